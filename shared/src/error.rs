//! Unified error system for the scheduling engine
//!
//! Provides:
//! - [`ErrorCode`]: standardized error codes
//! - [`AppError`]: rich error type with codes, messages, and details
//!
//! Scheduling conflicts are NOT errors; they are ordinary return values
//! (`Option<ConflictInfo>`) that callers turn into validation messages.
//! This module covers the genuinely exceptional conditions: invalid
//! adjustment payloads and persistence failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error codes, grouped by domain
///
/// - 0xxx: general
/// - 4xxx: adjustment / interval errors
/// - 9xxx: system errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound = 404,
    /// Request payload failed validation
    ValidationFailed = 422,
    /// Adjustment window violates an interval invariant
    InvalidInterval = 4001,
    /// Persistence layer failure
    StorageError = 9001,
    /// Unclassified internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Default human-readable message for the code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidInterval => "Invalid time interval",
            ErrorCode::StorageError => "Storage operation failed",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an invalid interval error
    pub fn invalid_interval(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidInterval, msg)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::invalid_interval("window too short")
            .with_detail("start_min", 600)
            .with_detail("end_min", 605);

        assert_eq!(err.code, ErrorCode::InvalidInterval);
        let details = err.details.unwrap();
        assert_eq!(details.get("start_min").unwrap(), 600);
        assert_eq!(details.get("end_min").unwrap(), 605);
    }
}
