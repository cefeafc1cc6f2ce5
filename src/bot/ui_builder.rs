//! UI Builder module for creating keyboards and formatting messages

use anyhow::Result;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::{t_lang, LocalizationManager};

/// Help-section slugs addressed as `hb1` .. `hb15`, in panel order
pub const HELP_SECTIONS: [&str; 15] = [
    "admin",
    "auth",
    "broadcast",
    "blacklist-chat",
    "blacklist-user",
    "channel-play",
    "global-cast",
    "loop",
    "ping",
    "play",
    "queue",
    "seek",
    "shuffle",
    "song",
    "speed",
];

/// Which page of the two-page help panel is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpPage {
    One,
    Two,
}

/// Slug for a 1-based help section number
pub fn section_slug(section: u8) -> Option<&'static str> {
    if section == 0 {
        return None;
    }
    HELP_SECTIONS.get(section as usize - 1).copied()
}

/// Create the paged help panel keyboard
///
/// Section buttons carry `help_callback hbN` data. The navigation row's
/// arrows flip between the two pages; its middle button closes the panel,
/// or goes back to the settings origin when the panel was opened from there.
pub fn create_help_panel_keyboard(
    page: HelpPage,
    from_settings: bool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> InlineKeyboardMarkup {
    let mut buttons = Vec::new();

    let (sections, nav_target) = match page {
        HelpPage::One => (1u8..=9, "help_page_2"),
        HelpPage::Two => (10u8..=15, "settings_back_helper"),
    };

    for chunk in sections.collect::<Vec<_>>().chunks(3) {
        let row = chunk
            .iter()
            .filter_map(|section| {
                section_slug(*section).map(|slug| {
                    InlineKeyboardButton::callback(
                        t_lang(
                            localization,
                            &format!("help-button-{}", slug),
                            language_code,
                        ),
                        format!("help_callback hb{}", section),
                    )
                })
            })
            .collect::<Vec<_>>();
        buttons.push(row);
    }

    let middle = if from_settings {
        InlineKeyboardButton::callback(
            t_lang(localization, "back-button", language_code),
            "settings_back_helper".to_string(),
        )
    } else {
        InlineKeyboardButton::callback(
            t_lang(localization, "close-button", language_code),
            "close".to_string(),
        )
    };

    buttons.push(vec![
        InlineKeyboardButton::callback("◁", nav_target.to_string()),
        middle,
        InlineKeyboardButton::callback("▷", nav_target.to_string()),
    ]);

    InlineKeyboardMarkup::new(buttons)
}

/// Single back button under an opened help section
pub fn create_help_back_keyboard(
    page: HelpPage,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> InlineKeyboardMarkup {
    let callback_data = match page {
        HelpPage::Two => "help_page_2",
        HelpPage::One => "settings_back_helper",
    };

    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        t_lang(localization, "back-button", language_code),
        callback_data.to_string(),
    )]])
}

/// Deep-link button pointing group users at the private help menu
pub fn create_group_help_keyboard(
    bot_username: &str,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<InlineKeyboardMarkup> {
    let link = url::Url::parse(&format!("https://t.me/{}?start=help", bot_username))?;

    Ok(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url(
            t_lang(localization, "help-group-button", language_code),
            link,
        ),
    ]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::LocalizationManager;

    fn manager() -> LocalizationManager {
        LocalizationManager::new().expect("localization manager should build")
    }

    fn button_data(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
        markup
            .inline_keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| match &button.kind {
                        teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                            data.clone()
                        }
                        teloxide::types::InlineKeyboardButtonKind::Url(url) => url.to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_page_one_layout() {
        let localization = manager();
        let markup = create_help_panel_keyboard(HelpPage::One, false, None, &localization);
        let data = button_data(&markup);

        // three section rows of three, one navigation row
        assert_eq!(data.len(), 4);
        assert_eq!(data[0], vec!["help_callback hb1", "help_callback hb2", "help_callback hb3"]);
        assert_eq!(data[2], vec!["help_callback hb7", "help_callback hb8", "help_callback hb9"]);
        // both arrows flip to page two, close in the middle
        assert_eq!(data[3], vec!["help_page_2", "close", "help_page_2"]);
    }

    #[test]
    fn test_page_two_layout() {
        let localization = manager();
        let markup = create_help_panel_keyboard(HelpPage::Two, true, None, &localization);
        let data = button_data(&markup);

        assert_eq!(data.len(), 3);
        assert_eq!(
            data[0],
            vec!["help_callback hb10", "help_callback hb11", "help_callback hb12"]
        );
        assert_eq!(
            data[1],
            vec!["help_callback hb13", "help_callback hb14", "help_callback hb15"]
        );
        // both arrows go back to page one, back button in the middle
        assert_eq!(
            data[2],
            vec!["settings_back_helper", "settings_back_helper", "settings_back_helper"]
        );
    }

    #[test]
    fn test_back_keyboard_targets() {
        let localization = manager();

        let markup = create_help_back_keyboard(HelpPage::One, None, &localization);
        assert_eq!(button_data(&markup), vec![vec!["settings_back_helper"]]);

        let markup = create_help_back_keyboard(HelpPage::Two, None, &localization);
        assert_eq!(button_data(&markup), vec![vec!["help_page_2"]]);
    }

    #[test]
    fn test_group_keyboard_deep_link() {
        let localization = manager();
        let markup = create_group_help_keyboard("tunegram_bot", None, &localization).unwrap();
        let data = button_data(&markup);

        assert_eq!(data.len(), 1);
        assert_eq!(data[0][0], "https://t.me/tunegram_bot?start=help");
    }

    #[test]
    fn test_section_slugs() {
        assert_eq!(section_slug(1), Some("admin"));
        assert_eq!(section_slug(15), Some("speed"));
        assert_eq!(section_slug(0), None);
        assert_eq!(section_slug(16), None);
    }
}
