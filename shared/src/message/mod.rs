//! Engine event envelopes
//!
//! Cross-view synchronization messages. When an adjustment is committed,
//! the engine broadcasts an [`EngineEvent`] so dependent views (countdown
//! sidebars, other open timelines) recompute without polling. This replaces
//! ambient window-scoped events with an explicit publish/subscribe contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Engine event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Manual adjustments changed for some date
    AdjustmentsChanged,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::AdjustmentsChanged => write!(f, "adjustments_changed"),
        }
    }
}

/// Event envelope carried on the adjustment bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
    pub kind: EventKind,
    pub payload: AdjustmentsChanged,
    /// Used for message tracing
    pub request_id: Uuid,
}

impl EngineEvent {
    /// Create a new event with a fresh request id
    pub fn adjustments_changed(payload: AdjustmentsChanged) -> Self {
        Self {
            kind: EventKind::AdjustmentsChanged,
            payload,
            request_id: Uuid::new_v4(),
        }
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
