//! Common utilities and shared infrastructure
//!
//! - Logging setup
//! - Result type aliases

pub mod logger;
pub mod result;

// Re-export commonly used items
pub use logger::{init_logger, init_logger_with_file};
pub use result::EngineResult;
