//! Unified Result Types

use shared::error::AppError;

/// Engine-level Result type
///
/// Used for fallible engine operations (adjustment validation, persistence)
pub type EngineResult<T> = Result<T, AppError>;
