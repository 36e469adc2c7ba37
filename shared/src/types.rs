//! Common types for the shared crate
//!
//! Utility types used across the workspace

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Minute-of-day offset, relative to midnight of a reservation's calendar day.
///
/// Values normally live in `[0, 1440)`. An end value above [`DAY_MINUTES`]
/// means the occupancy spills over into the next calendar day; spillover is
/// capped at `DAY_MINUTES + MAX_SPILL_MINUTES`.
pub type Minute = i32;

/// Minutes in one operating day
pub const DAY_MINUTES: Minute = 1440;

/// Timeline grid step; all persisted/displayed minutes snap to this
pub const SNAP_STEP_MINUTES: Minute = 5;

/// A block may never shrink below this floor
pub const MIN_BLOCK_MINUTES: Minute = 15;

/// Maximum next-day spillover (6 hours past midnight)
pub const MAX_SPILL_MINUTES: Minute = 360;

/// A loosely-typed reference to a dining table, as stored on reservations.
///
/// Raw references drift as zone layouts are re-saved: the same physical table
/// may be stored by id in one snapshot and by display number in another, and
/// ids are recreated when a layout is rebuilt. The resolver tries each
/// interpretation in priority order instead of trusting a single one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TableRef {
    /// Layout-snapshot table id
    ById(String),
    /// Display number
    ByNumber(u32),
    /// Display name
    ByName(String),
}

impl TableRef {
    /// Classify a raw stored reference: pure digits become a number
    /// candidate, anything else an id candidate.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<u32>() {
                return TableRef::ByNumber(n);
            }
        }
        TableRef::ById(trimmed.to_string())
    }

    /// The raw string form, as it would have been stored
    pub fn raw(&self) -> String {
        match self {
            TableRef::ById(id) => id.clone(),
            TableRef::ByNumber(n) => n.to_string(),
            TableRef::ByName(name) => name.clone(),
        }
    }

    /// Display number, when this reference is numeric
    pub fn number(&self) -> Option<u32> {
        match self {
            TableRef::ByNumber(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw())
    }
}
