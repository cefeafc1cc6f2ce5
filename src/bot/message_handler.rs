//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use super::command_handlers;
use super::BotContext;
use crate::observability;

/// Route an incoming message to the matching command handler
pub async fn message_handler(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> Result<()> {
    let span = observability::telegram_span(
        "message_handler",
        msg.from.as_ref().map(|user| user.id.0 as i64),
    );
    let _enter = span.enter();

    if let Some(user) = msg.from.as_ref() {
        if ctx.config.banned_users.contains(&user.id.0) {
            debug!(user_id = %user.id, "Ignoring message from banned user");
            return Ok(());
        }
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some((command, args)) = split_command(text, &ctx.bot_username) else {
        return Ok(());
    };

    let start_time = std::time::Instant::now();

    let result = match command {
        "/help" => command_handlers::handle_help_command(&bot, &msg, &ctx).await,
        "/thumb" => command_handlers::handle_thumb_command(&bot, &msg, &ctx, args).await,
        _ => Ok(()),
    };

    observability::record_request_metrics(
        "telegram_message",
        if result.is_ok() { 200 } else { 500 },
        start_time.elapsed(),
    );

    result
}

/// Split `/command[@bot] args` into command and argument string
///
/// Commands addressed to a different bot are dropped, so the handler stays
/// quiet in groups with several bots.
fn split_command<'a>(text: &'a str, bot_username: &str) -> Option<(&'a str, &'a str)> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (head, args) = match trimmed.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (trimmed, ""),
    };

    let command = match head.split_once('@') {
        Some((_, target)) if !target.eq_ignore_ascii_case(bot_username) => return None,
        Some((command, _)) => command,
        None => head,
    };

    Some((command, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_command() {
        assert_eq!(split_command("/help", "tunegram_bot"), Some(("/help", "")));
    }

    #[test]
    fn test_command_with_args() {
        assert_eq!(
            split_command("/thumb dQw4w9WgXcQ", "tunegram_bot"),
            Some(("/thumb", "dQw4w9WgXcQ"))
        );
        assert_eq!(
            split_command("  /thumb   https://youtu.be/dQw4w9WgXcQ  ", "tunegram_bot"),
            Some(("/thumb", "https://youtu.be/dQw4w9WgXcQ"))
        );
    }

    #[test]
    fn test_addressed_command() {
        assert_eq!(
            split_command("/help@tunegram_bot", "tunegram_bot"),
            Some(("/help", ""))
        );
        assert_eq!(
            split_command("/help@Tunegram_Bot", "tunegram_bot"),
            Some(("/help", ""))
        );
        assert_eq!(split_command("/help@other_bot", "tunegram_bot"), None);
    }

    #[test]
    fn test_non_commands_are_ignored() {
        assert_eq!(split_command("hello there", "tunegram_bot"), None);
        assert_eq!(split_command("", "tunegram_bot"), None);
        assert_eq!(split_command("   ", "tunegram_bot"), None);
    }
}
