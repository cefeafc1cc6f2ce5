//! Help menu callback handlers
//!
//! The help panel lives in a single message that gets edited in place:
//! `settings_back_helper` restores the page-1 panel, `help_page_2` swaps the
//! keyboard to page 2, `help_callback hbN` shows one section, and `close`
//! deletes the message. The panel message is a photo when it was opened via
//! /help, so text edits fall back to caption edits.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MaybeInaccessibleMessage, MessageId};
use tracing::{debug, warn};

use crate::bot::ui_builder::{
    create_help_back_keyboard, create_help_panel_keyboard, section_slug, HelpPage,
};
use crate::bot::BotContext;
use crate::errors::error_logging;
use crate::localization::{t_args_lang, t_lang};
use crate::validation::parse_help_section;

fn target_message(q: &CallbackQuery) -> Option<(ChatId, MessageId)> {
    match q.message.as_ref()? {
        MaybeInaccessibleMessage::Regular(msg) => Some((msg.chat.id, msg.id)),
        MaybeInaccessibleMessage::Inaccessible(_) => None,
    }
}

/// Replace the message content, whether it is a text or a photo message
async fn edit_panel(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<()> {
    let edited = bot
        .edit_message_text(chat_id, message_id, text.clone())
        .reply_markup(keyboard.clone())
        .await;

    if edited.is_err() {
        // photo messages carry a caption instead of text
        bot.edit_message_caption(chat_id, message_id)
            .caption(text)
            .reply_markup(keyboard)
            .await?;
    }

    Ok(())
}

/// `settings_back_helper`: back to the page-1 help panel
pub async fn handle_help_home(bot: &Bot, q: &CallbackQuery, ctx: &BotContext) -> Result<()> {
    let Some((chat_id, message_id)) = target_message(q) else {
        return Ok(());
    };
    let language_code = q.from.language_code.as_deref();

    let caption = t_args_lang(
        &ctx.localization,
        "help-caption",
        language_code,
        &[("support", ctx.config.support_chat.as_str())],
    );
    let keyboard =
        create_help_panel_keyboard(HelpPage::One, true, language_code, &ctx.localization);

    edit_panel(bot, chat_id, message_id, caption, keyboard).await
}

/// `help_page_2`: swap the reply markup to the page-2 panel
pub async fn handle_help_page_two(bot: &Bot, q: &CallbackQuery, ctx: &BotContext) -> Result<()> {
    let Some((chat_id, message_id)) = target_message(q) else {
        return Ok(());
    };
    let language_code = q.from.language_code.as_deref();

    let keyboard =
        create_help_panel_keyboard(HelpPage::Two, true, language_code, &ctx.localization);

    if let Err(e) = bot
        .edit_message_reply_markup(chat_id, message_id)
        .reply_markup(keyboard)
        .await
    {
        // editing fails when the markup is already on page 2; not fatal
        warn!(error = %e, chat_id = %chat_id, "Page 2 navigation edit failed");
    }

    Ok(())
}

/// `help_callback hbN`: show one help section with a back button
pub async fn handle_help_section(
    bot: &Bot,
    q: &CallbackQuery,
    data: &str,
    ctx: &BotContext,
) -> Result<()> {
    let Some((chat_id, message_id)) = target_message(q) else {
        return Ok(());
    };
    let language_code = q.from.language_code.as_deref();

    let section = match parse_help_section(data) {
        Ok(section) => section,
        Err(e) => {
            error_logging::log_validation_error(
                &e,
                "parse_help_callback",
                Some(q.from.id.0 as i64),
                Some(data),
            );
            return Ok(());
        }
    };

    let Some(slug) = section_slug(section) else {
        return Ok(());
    };

    // sections on page 2 route their back button there
    let page = if section >= 10 {
        HelpPage::Two
    } else {
        HelpPage::One
    };

    let text = t_lang(
        &ctx.localization,
        &format!("help-section-{}", slug),
        language_code,
    );
    let keyboard = create_help_back_keyboard(page, language_code, &ctx.localization);

    debug!(user_id = %q.from.id, section = section, slug = slug, "Showing help section");
    edit_panel(bot, chat_id, message_id, text, keyboard).await
}

/// `close`: remove the panel message
pub async fn handle_close(bot: &Bot, q: &CallbackQuery) -> Result<()> {
    let Some((chat_id, message_id)) = target_message(q) else {
        return Ok(());
    };

    if let Err(e) = bot.delete_message(chat_id, message_id).await {
        debug!(error = %e, chat_id = %chat_id, "Could not delete help panel message");
    }

    Ok(())
}
