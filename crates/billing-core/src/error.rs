//! # Error Types
//!
//! Domain-specific error types for billing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billing-core errors (this file)                                       │
//! │  ├── CoreError        - Editor / document errors                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  invoice-editor errors (app)                                           │
//! │  └── ApiError         - What the form UI sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Form UI                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculators themselves never fail: they compute whatever the numbers
//! say, negative totals included. Errors only exist for the validation that
//! guards a submission and for callers that address a line that is not there.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised around the line item editor.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line index outside the current collection.
    #[error("Line {index} not found (document has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input does not meet the line item invariants.
/// Used before a document is handed off for persistence.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., "abc" typed into a price field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A specific line of the document failed validation.
    ///
    /// `line` is 1-based, matching what the form displays.
    #[error("Line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line 4 not found (document has 2 lines)");
    }

    #[test]
    fn test_invalid_line_message_is_one_based() {
        let err = ValidationError::InvalidLine {
            line: 2,
            source: Box::new(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }),
        };
        assert_eq!(err.to_string(), "Line 2: quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "description".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
