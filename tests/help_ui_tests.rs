//! Integration tests for the help panel UI: keyboard layout, callback data,
//! and localization of labels and captions.

mod test_helpers;

use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};
use tunegram::bot::ui_builder::{
    create_group_help_keyboard, create_help_back_keyboard, create_help_panel_keyboard,
    section_slug, HelpPage, HELP_SECTIONS,
};
use tunegram::localization::t_args_lang;
use tunegram::validation::{parse_help_section, HELP_SECTION_COUNT};

fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
    markup
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}

fn button_labels(markup: &InlineKeyboardMarkup) -> Vec<String> {
    markup
        .inline_keyboard
        .iter()
        .flatten()
        .map(|button| button.text.clone())
        .collect()
}

#[test]
fn every_panel_button_parses_back_into_a_section() {
    let localization = test_helpers::setup_localization();

    for page in [HelpPage::One, HelpPage::Two] {
        let markup = create_help_panel_keyboard(page, false, None, &localization);
        for data in callback_data(&markup) {
            if data.starts_with("help_callback") {
                let section = parse_help_section(&data).expect("panel emitted unparsable data");
                assert!(section >= 1 && section <= HELP_SECTION_COUNT);
            }
        }
    }
}

#[test]
fn both_pages_cover_all_fifteen_sections() {
    let localization = test_helpers::setup_localization();

    let mut seen = Vec::new();
    for page in [HelpPage::One, HelpPage::Two] {
        let markup = create_help_panel_keyboard(page, false, None, &localization);
        for data in callback_data(&markup) {
            if let Ok(section) = parse_help_section(&data) {
                seen.push(section);
            }
        }
    }

    seen.sort_unstable();
    let expected: Vec<u8> = (1..=HELP_SECTION_COUNT).collect();
    assert_eq!(seen, expected);
}

#[test]
fn section_numbers_map_onto_slugs() {
    for section in 1..=HELP_SECTION_COUNT {
        let slug = section_slug(section).expect("section without slug");
        assert_eq!(HELP_SECTIONS[section as usize - 1], slug);
    }
    assert!(section_slug(HELP_SECTION_COUNT + 1).is_none());
}

#[test]
fn middle_button_depends_on_origin() {
    let localization = test_helpers::setup_localization();

    let from_help = create_help_panel_keyboard(HelpPage::One, false, None, &localization);
    assert!(callback_data(&from_help).contains(&"close".to_string()));

    let from_settings = create_help_panel_keyboard(HelpPage::One, true, None, &localization);
    let data = callback_data(&from_settings);
    assert!(!data.contains(&"close".to_string()));
    assert!(data.contains(&"settings_back_helper".to_string()));
}

#[test]
fn back_keyboard_returns_to_the_right_page() {
    let localization = test_helpers::setup_localization();

    // sections hb1-hb9 go home, hb10-hb15 go back to page two
    let back_one = create_help_back_keyboard(HelpPage::One, None, &localization);
    assert_eq!(callback_data(&back_one), vec!["settings_back_helper"]);

    let back_two = create_help_back_keyboard(HelpPage::Two, None, &localization);
    assert_eq!(callback_data(&back_two), vec!["help_page_2"]);
}

#[test]
fn labels_are_localized() {
    let localization = test_helpers::setup_localization();

    let english = create_help_panel_keyboard(HelpPage::One, false, Some("en"), &localization);
    assert!(button_labels(&english)
        .iter()
        .any(|label| label.contains("Close")));

    let french = create_help_panel_keyboard(HelpPage::One, false, Some("fr"), &localization);
    assert!(button_labels(&french)
        .iter()
        .any(|label| label.contains("Fermer")));

    // unsupported language falls back to English
    let german = create_help_panel_keyboard(HelpPage::One, false, Some("de"), &localization);
    assert!(button_labels(&german)
        .iter()
        .any(|label| label.contains("Close")));
}

#[test]
fn caption_substitutes_the_support_chat() {
    let localization = test_helpers::setup_localization();

    let caption = t_args_lang(
        &localization,
        "help-caption",
        Some("en"),
        &[("support", "https://t.me/ExampleSupport")],
    );
    assert!(caption.contains("https://t.me/ExampleSupport"));

    let caption_fr = t_args_lang(
        &localization,
        "help-caption",
        Some("fr"),
        &[("support", "https://t.me/ExampleSupport")],
    );
    assert!(caption_fr.contains("https://t.me/ExampleSupport"));
    assert!(caption_fr.contains("aide"));
}

#[test]
fn group_keyboard_links_to_private_chat() {
    let localization = test_helpers::setup_localization();
    let markup = create_group_help_keyboard("tunegram_bot", Some("en"), &localization)
        .expect("keyboard should build");

    let urls: Vec<String> = markup
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|button| match &button.kind {
            InlineKeyboardButtonKind::Url(url) => Some(url.to_string()),
            _ => None,
        })
        .collect();

    assert_eq!(urls, vec!["https://t.me/tunegram_bot?start=help"]);
}
