//! Callback query handling for the help menu

pub mod callback_handler;
pub mod help_callbacks;

pub use callback_handler::callback_handler;
