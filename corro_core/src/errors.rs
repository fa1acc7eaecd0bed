//! # Error Types
//!
//! Structured error types for corro_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use corro_core::errors::{AssessError, AssessResult};
//!
//! fn validate_maop(maop: f64) -> AssessResult<()> {
//!     if maop <= 0.0 {
//!         return Err(AssessError::InvalidInput {
//!             field: "maop".to_string(),
//!             value: maop.to_string(),
//!             reason: "MAOP must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for corro_core operations
pub type AssessResult<T> = Result<T, AssessError>;

/// Structured error type for assessment operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
/// All variants except [`AssessError::ComputationFailed`] are detected
/// before any model runs; `ComputationFailed` means the inputs passed
/// validation but fell outside the model's valid physical range.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AssessError {
    /// The request could not be read as numbers (missing or non-numeric field)
    #[error("Invalid input format: {reason}")]
    InvalidFormat { reason: String },

    /// An input value violates its range constraint (positivity, ordering)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unrecognized assessment method selector
    #[error("Unknown assessment method: '{value}'")]
    UnknownMethod { value: String },

    /// Unrecognized safety class selector
    #[error("Unknown safety class: '{value}'")]
    UnknownSafetyClass { value: String },

    /// The model produced an undefined result (division by zero, negative
    /// value under a square root) for an input combination outside its
    /// valid physical range
    #[error("Computation failed: {method} - {reason}")]
    ComputationFailed { method: String, reason: String },
}

impl AssessError {
    /// Create an InvalidFormat error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        AssessError::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AssessError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownMethod error
    pub fn unknown_method(value: impl Into<String>) -> Self {
        AssessError::UnknownMethod {
            value: value.into(),
        }
    }

    /// Create an UnknownSafetyClass error
    pub fn unknown_safety_class(value: impl Into<String>) -> Self {
        AssessError::UnknownSafetyClass {
            value: value.into(),
        }
    }

    /// Create a ComputationFailed error
    pub fn computation_failed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        AssessError::ComputationFailed {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix this by correcting the request
    /// (4xx-equivalent). `ComputationFailed` is the one server-class
    /// error (5xx-equivalent): validation passed but the model's
    /// formulas were undefined for the combination.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AssessError::ComputationFailed { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AssessError::InvalidFormat { .. } => "INVALID_FORMAT",
            AssessError::InvalidInput { .. } => "INVALID_INPUT",
            AssessError::UnknownMethod { .. } => "UNKNOWN_METHOD",
            AssessError::UnknownSafetyClass { .. } => "UNKNOWN_SAFETY_CLASS",
            AssessError::ComputationFailed { .. } => "COMPUTATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = AssessError::invalid_input("maop", "-1.5", "MAOP must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: AssessError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AssessError::unknown_method("b31g-classic").error_code(),
            "UNKNOWN_METHOD"
        );
        assert_eq!(
            AssessError::invalid_format("missing field `maop`").error_code(),
            "INVALID_FORMAT"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(AssessError::invalid_format("oops").is_client_error());
        assert!(AssessError::invalid_input("smys", "0", "must be positive").is_client_error());
        assert!(AssessError::unknown_safety_class("extreme").is_client_error());
        assert!(!AssessError::computation_failed("modified-flow-stress", "division by zero")
            .is_client_error());
    }
}
