//! # Error Handling
//!
//! This module defines custom error types and how they're converted to HTTP responses.
//!
//! ## Key Rust Concepts for Error Handling:
//!
//! ### Result<T, E> Type
//! - **Purpose**: Forces you to handle both success and failure cases
//! - **T**: The success type (what you get when everything works)
//! - **E**: The error type (what you get when something goes wrong)
//! - **No exceptions**: Rust doesn't have try/catch, it uses Result instead
//!
//! ### Traits for Error Conversion
//! - **From trait**: Automatically converts between error types
//! - **ResponseError trait**: Converts errors to HTTP responses
//! - **Display trait**: Defines how errors are formatted as strings
//!
//! ## A note on this service:
//! The placeholder handlers never fail - every request to `/health`,
//! `/process`, and `/analyze` answers 200 with a fixed payload, and
//! "not implemented" travels inside the payload rather than as an HTTP
//! status. This error type exists so the handler signatures already carry
//! the failure channel the real orchestration and analysis code will need.

use actix_web::{HttpResponse, ResponseError};  // Web framework error handling
use serde_json::json;                          // For creating JSON error responses
use std::fmt;                                  // For implementing Display trait

/// Custom error types for the application.
///
/// ## Error Categories:
/// - **Internal**: Server-side problems (500 errors)
/// - **BadRequest**: Client sent invalid data (400 errors)
/// - **ConfigError**: Configuration problems (500 errors)
#[derive(Debug)]
pub enum AppError {
    /// Internal server errors (orchestration failures, unexpected I/O, etc.)
    Internal(String),

    /// Client sent invalid or malformed data
    BadRequest(String),

    /// Configuration file or environment variable problems
    ConfigError(String),
}

/// Human-readable formatting for AppError, used when an error is printed
/// or converted to a string.
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

/// Converts our custom errors into HTTP responses that clients can understand.
/// Actix calls this automatically when a handler returns an Err.
///
/// ## HTTP Status Code Mapping:
/// - Internal/ConfigError → 500 (Internal Server Error)
/// - BadRequest → 400 (Bad Request)
///
/// ## JSON Response Format:
/// ```json
/// {
///   "error": {
///     "type": "bad_request",
///     "message": "JSON parsing error: ...",
///     "timestamp": "2025-01-01T12:00:00Z"
///   }
/// }
/// ```
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        // Map each error type to HTTP status code, error type, and message
        let (status, error_type, message) = match self {
            AppError::Internal(msg) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,  // 500
                "internal_error",
                msg.clone(),
            ),
            AppError::BadRequest(msg) => (
                actix_web::http::StatusCode::BAD_REQUEST,  // 400
                "bad_request",
                msg.clone(),
            ),
            AppError::ConfigError(msg) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,  // 500
                "config_error",
                msg.clone(),
            ),
        };

        // Build the HTTP response with JSON body
        HttpResponse::build(status).json(json!({
            "error": {
                "type": error_type,           // Machine-readable error type
                "message": message,           // Human-readable error message
                "timestamp": chrono::Utc::now().to_rfc3339()  // When the error occurred
            }
        }))
    }
}

/// Automatic conversion from anyhow::Error to AppError.
///
/// When you use `?` with an anyhow::Error inside a handler, it automatically
/// becomes an AppError::Internal.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Automatic conversion from JSON parsing errors to AppError.
///
/// JSON parsing errors are almost always due to the client sending malformed
/// data, so they map to 400 (Bad Request), not 500 (Internal Server Error).
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON parsing error: {}", err))
    }
}

/// Automatic conversion from configuration errors to AppError.
///
/// ## When this happens:
/// - config.toml file has invalid syntax
/// - Configuration values fail to deserialize
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

/// Type alias for Results that use our custom error type.
///
/// Lets you write `AppResult<String>` instead of `Result<String, AppError>`.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    /// Test that each error variant maps to the right HTTP status code.
    #[test]
    fn test_status_code_mapping() {
        let internal = AppError::Internal("boom".to_string());
        assert_eq!(internal.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad_request = AppError::BadRequest("bad json".to_string());
        assert_eq!(bad_request.error_response().status(), StatusCode::BAD_REQUEST);

        let config_error = AppError::ConfigError("bad toml".to_string());
        assert_eq!(config_error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Test that JSON parsing failures convert to BadRequest.
    #[test]
    fn test_serde_json_error_converts_to_bad_request() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let app_err: AppError = parse_err.into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }

    /// Test that anyhow errors convert to Internal.
    #[test]
    fn test_anyhow_error_converts_to_internal() {
        let app_err: AppError = anyhow::anyhow!("orchestrator fell over").into();
        assert!(matches!(app_err, AppError::Internal(_)));
        assert_eq!(app_err.to_string(), "Internal error: orchestrator fell over");
    }
}
