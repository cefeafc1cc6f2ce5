//! # Bot Configuration Module
//!
//! Environment-driven configuration for the bot surface and the thumbnail
//! pipeline, with startup validation in the same style as the observability
//! configuration.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use crate::thumbnail::ThumbStyle;

// Constants for thumbnail configuration
pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 720;
pub const MAX_COVER_BYTES: u64 = 10 * 1024 * 1024; // 10MB limit for cover downloads
pub const DEFAULT_CACHE_TTL_SECS: u64 = 6 * 60 * 60; // stale cache files swept after 6h

/// Configuration for the bot surface (commands, help menu)
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Support chat link substituted into the help caption
    pub support_chat: String,
    /// Image URLs the private /help reply picks from at random
    pub start_image_urls: Vec<String>,
    /// Telegram user ids ignored by every handler
    pub banned_users: HashSet<u64>,
    /// Timeout applied to the shared HTTP client, in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            support_chat: "https://t.me/TunegramSupport".to_string(),
            start_image_urls: vec![
                "https://telegra.ph/file/tunegram-start-01.jpg".to_string(),
                "https://telegra.ph/file/tunegram-start-02.jpg".to_string(),
            ],
            banned_users: HashSet::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            support_chat: env::var("TUNEGRAM_SUPPORT_CHAT").unwrap_or(defaults.support_chat),
            start_image_urls: env::var("TUNEGRAM_START_IMAGES")
                .map(|raw| parse_list(&raw))
                .unwrap_or(defaults.start_image_urls),
            banned_users: env::var("TUNEGRAM_BANNED_USERS")
                .map(|raw| {
                    parse_list(&raw)
                        .iter()
                        .filter_map(|id| id.parse::<u64>().ok())
                        .collect()
                })
                .unwrap_or(defaults.banned_users),
            http_timeout_secs: env::var("HTTP_CLIENT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.support_chat.trim().is_empty() {
            return Err("support chat link cannot be empty".to_string());
        }

        for raw in &self.start_image_urls {
            url::Url::parse(raw).map_err(|e| format!("invalid start image URL {}: {}", raw, e))?;
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP timeout cannot be 0".to_string());
        }

        if self.http_timeout_secs > 300 {
            return Err("HTTP timeout cannot exceed 300 seconds".to_string());
        }

        Ok(())
    }
}

/// Configuration for thumbnail generation
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Directory for downloaded covers and generated composites
    pub cache_dir: PathBuf,
    /// Static image returned when the pipeline fails
    pub fallback_thumb: PathBuf,
    /// Render style for generated thumbnails
    pub style: ThumbStyle,
    /// Branding text drawn on every thumbnail
    pub brand_text: String,
    /// Maximum accepted cover download size in bytes
    pub max_cover_bytes: u64,
    /// Age after which cache files are swept, in seconds
    pub cache_ttl_secs: u64,
    /// Regular-weight font file
    pub font_regular: PathBuf,
    /// Bold font file
    pub font_bold: PathBuf,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            fallback_thumb: PathBuf::from("assets/fallback_thumb.png"),
            style: ThumbStyle::Vinyl,
            brand_text: "Tunegram".to_string(),
            max_cover_bytes: MAX_COVER_BYTES,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            font_regular: PathBuf::from("assets/fonts/regular.ttf"),
            font_bold: PathBuf::from("assets/fonts/bold.ttf"),
        }
    }
}

impl ThumbnailConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_dir: env::var("TUNEGRAM_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            fallback_thumb: env::var("TUNEGRAM_FALLBACK_THUMB")
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_thumb),
            style: env::var("TUNEGRAM_THUMB_STYLE")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.style),
            brand_text: env::var("TUNEGRAM_BRAND_TEXT").unwrap_or(defaults.brand_text),
            max_cover_bytes: env::var("TUNEGRAM_MAX_COVER_BYTES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.max_cover_bytes),
            cache_ttl_secs: env::var("TUNEGRAM_CACHE_TTL_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            font_regular: env::var("TUNEGRAM_FONT_REGULAR")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_regular),
            font_bold: env::var("TUNEGRAM_FONT_BOLD")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_bold),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cover_bytes < 1024 * 1024 {
            return Err("max cover size must be at least 1MB".to_string());
        }

        if self.max_cover_bytes > 50 * 1024 * 1024 {
            return Err("max cover size cannot exceed 50MB".to_string());
        }

        if self.cache_ttl_secs == 0 {
            return Err("cache TTL cannot be 0".to_string());
        }

        if self.brand_text.trim().is_empty() {
            return Err("brand text cannot be empty".to_string());
        }

        Ok(())
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bot_config_is_valid() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.start_image_urls.is_empty());
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_default_thumbnail_config_is_valid() {
        let config = ThumbnailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.style, ThumbStyle::Vinyl);
        assert!(config.max_cover_bytes >= 1024 * 1024);
    }

    #[test]
    fn test_bot_config_rejects_bad_values() {
        let mut config = BotConfig::default();

        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.http_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.http_timeout_secs = 30;
        config.start_image_urls = vec!["not a url".to_string()];
        assert!(config.validate().is_err());

        config.start_image_urls = Vec::new();
        config.support_chat = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_thumbnail_config_rejects_bad_sizes() {
        let mut config = ThumbnailConfig::default();

        config.max_cover_bytes = 1024;
        assert!(config.validate().is_err());

        config.max_cover_bytes = 100 * 1024 * 1024;
        assert!(config.validate().is_err());

        config.max_cover_bytes = MAX_COVER_BYTES;
        config.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_list_parsing() {
        assert_eq!(
            parse_list("a, b ,,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(parse_list("  ").is_empty());
    }
}
