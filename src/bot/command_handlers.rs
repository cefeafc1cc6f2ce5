//! Command Handlers module for processing bot commands

use anyhow::Result;
use rand::prelude::*;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{debug, warn};
use url::Url;

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import UI builder functions
use super::ui_builder::{create_group_help_keyboard, create_help_panel_keyboard, HelpPage};

// Import shared handler context
use super::BotContext;

// Import observability
use crate::observability;

// Import error logging utilities
use crate::errors::error_logging;

/// Handle the /help command
///
/// Private chats get the photo panel with the paged inline keyboard; group
/// chats get a deep-link button into the private chat.
pub async fn handle_help_command(bot: &Bot, msg: &Message, ctx: &BotContext) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    observability::record_telegram_message("help_command");

    if msg.chat.is_private() {
        // best-effort removal of the trigger message
        if let Err(e) = bot.delete_message(msg.chat.id, msg.id).await {
            debug!(error = %e, chat_id = %msg.chat.id, "Could not delete /help trigger message");
        }

        let caption = t_args_lang(
            &ctx.localization,
            "help-caption",
            language_code,
            &[("support", ctx.config.support_chat.as_str())],
        );
        let keyboard =
            create_help_panel_keyboard(HelpPage::One, false, language_code, &ctx.localization);

        match choose_start_image(&ctx.config.start_image_urls) {
            Some(image_url) => {
                let sent = bot
                    .send_photo(msg.chat.id, InputFile::url(image_url))
                    .caption(caption.clone())
                    .reply_markup(keyboard.clone())
                    .has_spoiler(true)
                    .await;

                if let Err(e) = sent {
                    // the picture is decoration; fall back to a plain text panel
                    warn!(error = %e, chat_id = %msg.chat.id, "Help photo failed, sending text panel");
                    bot.send_message(msg.chat.id, caption)
                        .reply_markup(keyboard)
                        .await?;
                }
            }
            None => {
                bot.send_message(msg.chat.id, caption)
                    .reply_markup(keyboard)
                    .await?;
            }
        }
    } else {
        let keyboard =
            create_group_help_keyboard(&ctx.bot_username, language_code, &ctx.localization)?;
        bot.send_message(
            msg.chat.id,
            t_lang(&ctx.localization, "help-group-text", language_code),
        )
        .reply_markup(keyboard)
        .await?;
    }

    Ok(())
}

/// Handle the /thumb command: generate and send a "now playing" thumbnail
pub async fn handle_thumb_command(
    bot: &Bot,
    msg: &Message,
    ctx: &BotContext,
    args: &str,
) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    observability::record_telegram_message("thumb_command");

    if crate::validation::validate_basic_input(args).is_err() {
        bot.send_message(
            msg.chat.id,
            t_lang(&ctx.localization, "thumb-usage", language_code),
        )
        .await?;
        return Ok(());
    }

    let Some(video_id) = crate::youtube::parse_video_id(args) else {
        error_logging::log_validation_error(
            &"not a video id or YouTube link",
            "parse_thumb_argument",
            msg.from.as_ref().map(|user| user.id.0 as i64),
            Some(args),
        );
        bot.send_message(
            msg.chat.id,
            t_lang(&ctx.localization, "thumb-invalid", language_code),
        )
        .await?;
        return Ok(());
    };

    debug!(chat_id = %msg.chat.id, video_id = %video_id, "Generating thumbnail on request");

    let path = match ctx.thumbnails.generate(&video_id).await {
        Ok(path) => path,
        Err(e) => {
            error_logging::log_internal_error(
                &e,
                "ThumbnailGenerator",
                "generate_thumbnail",
                msg.from.as_ref().map(|user| user.id.0 as i64),
            );
            observability::record_error_metrics("generation", "thumbnail");
            bot.send_message(
                msg.chat.id,
                t_lang(&ctx.localization, "thumb-failed", language_code),
            )
            .await?;
            return Ok(());
        }
    };

    let sent = bot
        .send_photo(msg.chat.id, InputFile::file(path.clone()))
        .await;

    // generated files are one-shot; the static fallback stays put
    if path != ctx.thumbnails.fallback_path() {
        ctx.thumbnails.cache().remove_file(&path);
    }

    sent?;
    Ok(())
}

fn choose_start_image(urls: &[String]) -> Option<Url> {
    let mut rng = rand::rng();
    urls.choose(&mut rng)
        .and_then(|raw| Url::parse(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_start_image_empty_list() {
        assert!(choose_start_image(&[]).is_none());
    }

    #[test]
    fn test_choose_start_image_skips_unparseable() {
        let urls = vec!["definitely not a url".to_string()];
        assert!(choose_start_image(&urls).is_none());
    }

    #[test]
    fn test_choose_start_image_picks_from_list() {
        let urls = vec![
            "https://example.com/a.jpg".to_string(),
            "https://example.com/b.jpg".to_string(),
        ];
        let picked = choose_start_image(&urls).expect("should pick a url");
        assert!(picked.as_str().starts_with("https://example.com/"));
    }
}
