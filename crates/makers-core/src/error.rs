//! Error types module
//!
//! This module provides the application-level error type shared by the Product Makers
//! crates. Crate-specific errors (storage, forms, votes) convert into `AppError` at the
//! component boundary, where it is rendered as a user-facing notification.

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like partial uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can retry the operation
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("{failed} of {attempted} uploads failed")]
    UploadIncomplete { failed: usize, attempted: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote request failed: {0}")]
    Remote(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Static metadata per variant: (code, recoverable, suggested_action, log_level)
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Fix the highlighted field and try again"),
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the input and try again"),
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            "AUTHENTICATION_REQUIRED",
            false,
            Some("Sign in and try again"),
            LogLevel::Debug,
        ),
        AppError::UploadIncomplete { .. } => (
            "UPLOAD_INCOMPLETE",
            true,
            Some("Retry the failed uploads"),
            LogLevel::Warn,
        ),
        AppError::Storage(_) => (
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::Remote(_) => (
            "REMOTE_ERROR",
            true,
            Some("Check your connection and retry"),
            LogLevel::Warn,
        ),
        AppError::Serialization(_) => (
            "SERIALIZATION_ERROR",
            false,
            Some("Clear the saved draft and start again"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error output
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::UploadIncomplete { .. } => "UploadIncomplete",
            AppError::Storage(_) => "Storage",
            AppError::Remote(_) => "Remote",
            AppError::Serialization(_) => "Serialization",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ref err) => err.to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Unauthorized(_) => "You need to sign in to do that".to_string(),
            AppError::UploadIncomplete { failed, attempted } => {
                format!("{} of {} uploads failed", failed, attempted)
            }
            AppError::Storage(_) => "Failed to save your draft".to_string(),
            AppError::Remote(ref msg) => msg.clone(),
            AppError::Serialization(_) => "Saved draft could not be read".to_string(),
        }
    }
}
