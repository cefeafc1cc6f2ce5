//! Callback Handler module for processing inline keyboard callback queries

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

// Import help callbacks module
use super::help_callbacks;

// Import shared handler context
use crate::bot::BotContext;

// Import observability
use crate::observability;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: Arc<BotContext>) -> Result<()> {
    let span = observability::telegram_span("callback_handler", Some(q.from.id.0 as i64));
    let _enter = span.enter();

    let start_time = std::time::Instant::now();

    if ctx.config.banned_users.contains(&q.from.id.0) {
        debug!(user_id = %q.from.id, "Ignoring callback from banned user");
        return Ok(());
    }

    let data = q.data.as_deref().unwrap_or("").to_string();
    debug!(user_id = %q.from.id, data = %data, "Dispatching callback query");

    let result = if data == "settings_back_helper" {
        help_callbacks::handle_help_home(&bot, &q, &ctx).await
    } else if data == "help_page_2" {
        help_callbacks::handle_help_page_two(&bot, &q, &ctx).await
    } else if data.starts_with("help_callback") {
        help_callbacks::handle_help_section(&bot, &q, &data, &ctx).await
    } else if data == "close" {
        help_callbacks::handle_close(&bot, &q).await
    } else {
        Ok(())
    };

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    observability::record_request_metrics(
        "telegram_callback",
        if result.is_ok() { 200 } else { 500 },
        start_time.elapsed(),
    );

    result
}
