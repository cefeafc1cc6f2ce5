//! # Tunegram Bot Plugins
//!
//! Telegram music-bot plugin set: an inline-keyboard help menu and
//! "now playing" thumbnail generation from YouTube metadata and cover art.

pub mod bot;
pub mod cache;
pub mod config;
pub mod errors;
pub mod localization;
pub mod observability;
pub mod observability_config;
pub mod thumbnail;
pub mod validation;
pub mod youtube;

// Re-export types for easier access
pub use thumbnail::{ThumbStyle, ThumbnailGenerator};
pub use youtube::VideoMeta;
