//! # Application Error Types
//!
//! This module defines common error types used throughout the Tunegram plugins.
//! It provides structured error handling for the help menu and thumbnail
//! generation components.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (video ids, callback data, inputs)
    Validation(String),
    /// Metadata lookup errors (YouTube responses)
    Metadata(String),
    /// Image rendering/compositing errors
    Render(String),
    /// File system errors
    FileSystem(String),
    /// Network/communication errors
    Network(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Metadata(msg) => write!(f, "[METADATA] {}", msg),
            AppError::Render(msg) => write!(f, "[RENDER] {}", msg),
            AppError::FileSystem(msg) => write!(f, "[FILESYSTEM] {}", msg),
            AppError::Network(msg) => write!(f, "[NETWORK] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileSystem(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Render(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log network/communication errors with connection context
    pub fn log_network_error(
        error: &impl std::fmt::Display,
        operation: &str,
        endpoint: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            endpoint = ?endpoint,
            "Network operation failed"
        );
    }

    /// Log metadata lookup errors with video context
    pub fn log_metadata_error(error: &impl std::fmt::Display, operation: &str, video_id: &str) {
        error!(
            error = %error,
            operation = %operation,
            video_id = %video_id,
            "Metadata lookup failed"
        );
    }

    /// Log rendering errors with style and video context
    pub fn log_render_error(
        error: &impl std::fmt::Display,
        operation: &str,
        video_id: &str,
        style: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            video_id = %video_id,
            style = ?style,
            "Thumbnail rendering failed"
        );
    }

    /// Log file system errors with path and operation context
    pub fn log_filesystem_error(
        error: &impl std::fmt::Display,
        operation: &str,
        path: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            path = ?path,
            "File system operation failed"
        );
    }

    /// Log validation errors with input context
    pub fn log_validation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        user_id: Option<i64>,
        input_value: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            user_id = ?user_id,
            input_value = ?input_value.map(|v| if v.len() > 100 { format!("{}...", &v[..100]) } else { v.to_string() }),
            "Validation failed"
        );
    }

    /// Log internal application errors with component context
    pub fn log_internal_error(
        error: &impl std::fmt::Display,
        component: &str,
        operation: &str,
        user_id: Option<i64>,
    ) {
        error!(
            error = %error,
            component = %component,
            operation = %operation,
            user_id = ?user_id,
            "Internal application error"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}
