//! Manual Adjustment Model
//!
//! An adjustment overrides a reservation's default (guest-count-derived)
//! occupancy window. Adjustments are keyed by `(date, reservation_id)` and
//! written only on drag commit or an explicit extend-to-next-day action;
//! they are never auto-expired.

use crate::error::{AppError, AppResult};
use crate::types::{DAY_MINUTES, MAX_SPILL_MINUTES, MIN_BLOCK_MINUTES, Minute, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manual start/end override, minutes from midnight of the reservation's day.
///
/// `end_min` may exceed 1440 to represent spillover into the next calendar
/// day, up to 6 hours (`1440 + 360`). This is a deliberate modeling choice:
/// all grid math stays day-relative, and a window crossing midnight is just
/// an end value past `DAY_MINUTES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub start_min: Minute,
    pub end_min: Minute,
}

impl Adjustment {
    pub fn new(start_min: Minute, end_min: Minute) -> Self {
        Self { start_min, end_min }
    }

    /// Check the invariants a stored adjustment must satisfy:
    /// `start ∈ [0, 1440]`, `end - start >= 15`, `end <= 1440 + 360`.
    pub fn validate(&self) -> AppResult<()> {
        if self.start_min < 0 || self.start_min > DAY_MINUTES {
            return Err(AppError::invalid_interval("start outside the operating day")
                .with_detail("start_min", self.start_min));
        }
        if self.end_min - self.start_min < MIN_BLOCK_MINUTES {
            return Err(AppError::invalid_interval(format!(
                "window shorter than {} minutes",
                MIN_BLOCK_MINUTES
            ))
            .with_detail("start_min", self.start_min)
            .with_detail("end_min", self.end_min));
        }
        if self.end_min > DAY_MINUTES + MAX_SPILL_MINUTES {
            return Err(AppError::invalid_interval("spillover past the 6-hour cap")
                .with_detail("end_min", self.end_min));
        }
        Ok(())
    }

    /// Whether this window continues past midnight
    pub fn spills_over(&self) -> bool {
        self.end_min > DAY_MINUTES
    }
}

/// Stored adjustment row; the persisted form carries a write timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub reservation_id: String,
    pub start_min: Minute,
    pub end_min: Minute,
    pub updated_at: Timestamp,
}

impl AdjustmentRecord {
    pub fn adjustment(&self) -> Adjustment {
        Adjustment::new(self.start_min, self.end_min)
    }
}

/// All adjustments for one date, keyed by reservation id
pub type AdjustmentMap = HashMap<String, Adjustment>;
