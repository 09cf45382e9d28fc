//! # API Error Type
//!
//! Unified error type for editor commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form UI                     Rust Host                                  │
//! │  ───────                     ─────────                                  │
//! │                                                                         │
//! │  submitDocument()                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Unknown line? ──── CoreError::LineNotFound ──────┐             │  │
//! │  │         │                                          ▼             │  │
//! │  │  Invalid line? ──── ValidationError ───────────► ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "VALIDATION_ERROR"                                            │
//! │  e.message = "Line 2: quantity must be positive"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billing_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from editor commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Line 3 not found (document has 2 lines)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A line index that is not in the document
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Malformed request payload
    BadRequest,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineNotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            tracing::error!("I/O failure while handling JSON: {}", err);
            return ApiError::internal("Failed to read or write the document");
        }
        ApiError::bad_request(format!("Malformed document: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failure: {}", err);
        ApiError::internal(format!("I/O error: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_not_found_maps_to_not_found() {
        let err: ApiError = CoreError::LineNotFound { index: 3, len: 2 }.into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Line 3 not found (document has 2 lines)");
    }

    #[test]
    fn test_validation_maps_to_validation_error() {
        let err: ApiError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad");
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }
}
