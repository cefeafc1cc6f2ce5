//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `callbacks`: inline-keyboard callback query handling
//! - `command_handlers`: /help and /thumb command handling
//! - `message_handler`: routes incoming messages to commands
//! - `ui_builder`: creates the help panel keyboards

pub mod callbacks;
pub mod command_handlers;
pub mod message_handler;
pub mod ui_builder;

use std::sync::Arc;

use crate::config::BotConfig;
use crate::localization::LocalizationManager;
use crate::thumbnail::ThumbnailGenerator;

/// Shared dependencies handed to every handler
pub struct BotContext {
    pub config: BotConfig,
    pub localization: Arc<LocalizationManager>,
    pub thumbnails: Arc<ThumbnailGenerator>,
    pub bot_username: String,
}

// Re-export main handler functions for use in main.rs
pub use callbacks::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::{
    create_group_help_keyboard, create_help_back_keyboard, create_help_panel_keyboard, HelpPage,
};
