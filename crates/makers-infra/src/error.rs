//! Error reporting
//!
//! `ErrorResponse` is the serializable form of an `AppError` printed by the CLI;
//! `report_error` logs an error at the level its metadata asks for.

use makers_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let client_message = err.client_message();
        let internal = err.to_string();
        ErrorResponse {
            details: (internal != client_message).then_some(internal),
            error: client_message,
            code: err.error_code(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
        }
    }
}

/// Log `err` at its metadata log level
pub fn report_error(err: &AppError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error_code = code, error = %err, "Request failed"),
        LogLevel::Warn => tracing::warn!(error_code = code, error = %err, "Request failed"),
        LogLevel::Error => {
            tracing::error!(error_code = code, error = %err, detail = %err.detailed_message(), "Request failed")
        }
    }
}
