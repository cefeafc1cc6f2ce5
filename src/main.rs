use anyhow::Result;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;
use tunegram::bot::{self, BotContext};
use tunegram::config::{BotConfig, ThumbnailConfig};
use tunegram::localization;
use tunegram::observability;
use tunegram::thumbnail::ThumbnailGenerator;

// Stale cache files are checked for on this cadence
const CACHE_SWEEP_INTERVAL_SECS: u64 = 30 * 60;

/// Validate environment variables at startup
fn validate_environment_variables() -> Result<()> {
    // Validate TELEGRAM_BOT_TOKEN
    let bot_token = env::var("TELEGRAM_BOT_TOKEN")
        .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN environment variable is required but not set. Please set it to your Telegram bot token."))?;

    if bot_token.trim().is_empty() {
        return Err(anyhow::anyhow!("TELEGRAM_BOT_TOKEN cannot be empty"));
    }

    // Basic bot token format validation (Telegram bot tokens have a specific format: numbers:letters)
    if !bot_token.contains(':') {
        return Err(anyhow::anyhow!("TELEGRAM_BOT_TOKEN format is invalid. Telegram bot tokens should contain a colon (:) character."));
    }

    let parts: Vec<&str> = bot_token.split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!(
            "TELEGRAM_BOT_TOKEN format is invalid. Expected format: 'bot_id:bot_token'"
        ));
    }

    // Validate bot ID is numeric
    if parts[0].parse::<u64>().is_err() {
        return Err(anyhow::anyhow!("TELEGRAM_BOT_TOKEN bot ID must be numeric"));
    }

    // Validate bot token length (should be reasonably long)
    if parts[1].len() < 20 {
        return Err(anyhow::anyhow!(
            "TELEGRAM_BOT_TOKEN appears to be too short. Please verify it's a valid bot token."
        ));
    }

    info!("Environment variables validated successfully");
    Ok(())
}

/// Validate bot configuration at startup
fn validate_bot_configuration(config: &BotConfig) -> Result<()> {
    config.validate().map_err(|e| {
        anyhow::anyhow!(
            "Bot configuration validation failed: {}. Please check your configuration values.",
            e
        )
    })?;

    info!("Bot configuration validated successfully");
    Ok(())
}

/// Validate thumbnail configuration at startup
fn validate_thumbnail_configuration(config: &ThumbnailConfig) -> Result<()> {
    config.validate().map_err(|e| {
        anyhow::anyhow!(
            "Thumbnail configuration validation failed: {}. Please check your configuration values.",
            e
        )
    })?;

    info!("Thumbnail configuration validated successfully");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Validate environment variables early
    validate_environment_variables()?;

    // Get bot token from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");

    // Load and validate configuration
    let bot_config = BotConfig::from_env();
    validate_bot_configuration(&bot_config)?;

    let thumbnail_config = ThumbnailConfig::from_env();
    validate_thumbnail_configuration(&thumbnail_config)?;

    // Initialize observability stack (metrics, tracing, logging)
    observability::init_observability().await?;

    // Initialize localization manager
    let localization_manager = localization::create_localization_manager()?;

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(bot_config.http_timeout_secs))
        .build()
        .expect("Failed to create HTTP client");

    // Thumbnail generator shares the HTTP client with the bot
    let thumbnails = Arc::new(ThumbnailGenerator::new(
        client.clone(),
        thumbnail_config.clone(),
    )?);

    // Periodic sweep of stale cache files
    let sweep_cache = thumbnails.cache().clone();
    let cache_ttl = Duration::from_secs(thumbnail_config.cache_ttl_secs);
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(CACHE_SWEEP_INTERVAL_SECS));
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            let removed = sweep_cache.sweep_stale(cache_ttl);
            observability::record_cache_sweep(removed);
            if removed > 0 {
                info!(removed = removed, "Cache sweep removed stale files");
            }
        }
    });

    let bot = Bot::with_client(bot_token, client);

    let me = bot.get_me().await?;
    let bot_username = me.username().to_string();

    info!(bot_username = %bot_username, "Bot initialized, starting dispatcher");

    let ctx = Arc::new(BotContext {
        config: bot_config,
        localization: localization_manager,
        thumbnails,
        bot_username,
    });

    // Set up the dispatcher with shared context
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let ctx = Arc::clone(&ctx);
            move |bot: Bot, msg: Message| {
                let ctx = Arc::clone(&ctx);
                async move { bot::message_handler(bot, msg, ctx).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let ctx = Arc::clone(&ctx);
            move |bot: Bot, q: CallbackQuery| {
                let ctx = Arc::clone(&ctx);
                async move { bot::callback_handler(bot, q, ctx).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
