//! Shared types for the reservation scheduling engine
//!
//! Common types used across the workspace: data models, error types,
//! engine event envelopes, and utility types.

pub mod error;
pub mod message;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Event re-exports (for convenient access)
pub use message::{EngineEvent, EventKind};

// Type re-exports
pub use types::{Minute, TableRef, Timestamp, DAY_MINUTES};
