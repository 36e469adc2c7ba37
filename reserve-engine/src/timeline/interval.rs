//! Effective interval derivation
//!
//! A reservation's occupied window on the timeline comes from three inputs,
//! in priority order: a manual [`Adjustment`] if one exists, otherwise the
//! base arrival time plus the guest-count duration heuristic. Every value
//! that leaves this module is snapped to the 5-minute grid.
//!
//! Windows are minutes relative to midnight of the reservation's own day.
//! `end_min > 1440` is the spillover representation: the stay continues into
//! the next calendar day, capped at 6 hours past midnight. Day D+1 sees that
//! window as `[0, end_min - 1440)` via [`TimeInterval::spill_window`].

use crate::timeline::duration::estimate_duration;
use shared::models::Adjustment;
use shared::types::{DAY_MINUTES, MAX_SPILL_MINUTES, MIN_BLOCK_MINUTES, Minute, SNAP_STEP_MINUTES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open occupancy window `[start_min, end_min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_min: Minute,
    pub end_min: Minute,
}

impl TimeInterval {
    pub fn new(start_min: Minute, end_min: Minute) -> Self {
        Self { start_min, end_min }
    }

    pub fn width(&self) -> Minute {
        self.end_min - self.start_min
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Whether this window continues past midnight
    pub fn spills_over(&self) -> bool {
        self.end_min > DAY_MINUTES
    }

    /// The portion of this window that lands on the NEXT calendar day,
    /// re-based to that day's midnight. `None` when nothing spills over.
    pub fn spill_window(&self) -> Option<TimeInterval> {
        if !self.spills_over() {
            return None;
        }
        let spill_end = (self.end_min - DAY_MINUTES).min(DAY_MINUTES);
        if spill_end <= 0 {
            return None;
        }
        Some(TimeInterval::new(0, spill_end))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}–{}",
            format_minute_of_day(self.start_min),
            format_minute_of_day(self.end_min)
        )
    }
}

/// Convert `"HH:MM"` to minutes from start of day.
///
/// Hours clamp to 0–23 and minutes to 0–59; anything malformed degrades to
/// `00:00` rather than failing; reservation times are user-entered.
pub fn parse_time_to_minutes(time: &str) -> Minute {
    let mut parts = time.split(':');
    let h = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    let m = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    match (h, m) {
        (Some(h), Some(m)) => {
            let hh = h.clamp(0, 23) as Minute;
            let mm = m.clamp(0, 59) as Minute;
            hh * 60 + mm
        }
        _ => 0,
    }
}

/// Format a minute-of-day value as `HH:MM`.
///
/// Values up to 1440 render as this day's clock (1440 itself as `24:00`);
/// spillover values render as next-day clock time with a `+1` marker.
pub fn format_minute_of_day(minute: Minute) -> String {
    let m = minute.clamp(0, DAY_MINUTES + MAX_SPILL_MINUTES);
    if m <= DAY_MINUTES {
        format!("{:02}:{:02}", m / 60, m % 60)
    } else {
        let next = m - DAY_MINUTES;
        format!("{:02}:{:02}+1", next / 60, next % 60)
    }
}

/// Snap a minute value to the nearest multiple of `step`
pub fn snap_minutes(minutes: Minute, step: Minute) -> Minute {
    snap_minutes_f64(minutes as f64, step)
}

/// Snap a fractional minute value (e.g. converted from pixels) to the grid.
///
/// Ties round up, matching how pointer positions behave on the grid.
pub fn snap_minutes_f64(minutes: f64, step: Minute) -> Minute {
    let step_f = step as f64;
    ((minutes / step_f + 0.5).floor() * step_f) as Minute
}

/// Snap with the default grid step
pub fn snap(minutes: Minute) -> Minute {
    snap_minutes(minutes, SNAP_STEP_MINUTES)
}

/// Derive a reservation's effective occupancy window.
///
/// Without an adjustment: `[base, min(1440, base + estimate))` where `base`
/// is the parsed arrival time. With one: the manual window, clamped so the
/// start stays inside the day, the width stays at or above the 15-minute
/// floor, and the end stays within the 6-hour spillover cap. The result is
/// snapped to the grid and always at least [`MIN_BLOCK_MINUTES`] wide.
pub fn effective_interval(
    time: &str,
    guest_count: Option<i32>,
    adjustment: Option<&Adjustment>,
) -> TimeInterval {
    let default_start = parse_time_to_minutes(time).clamp(0, DAY_MINUTES - 1);
    let default_end = (default_start + estimate_duration(guest_count)).min(DAY_MINUTES);

    let (raw_start, raw_end) = match adjustment {
        Some(adj) => {
            let start = adj.start_min.clamp(0, DAY_MINUTES);
            let end = adj
                .end_min
                .clamp(start + MIN_BLOCK_MINUTES, DAY_MINUTES + MAX_SPILL_MINUTES);
            (start, end)
        }
        None => (default_start, default_end),
    };

    let start = snap(raw_start);
    let mut end = snap(raw_end);
    // MIN_BLOCK_MINUTES is a grid multiple, so the guard keeps alignment
    if end - start < MIN_BLOCK_MINUTES {
        end = start + MIN_BLOCK_MINUTES;
    }
    TimeInterval::new(start, end)
}
