//! Table-time scheduling core
//!
//! Pure computation over minute-of-day intervals:
//! - [`duration`]: guest count → default occupancy minutes
//! - [`interval`]: effective `[start, end)` window derivation, snapping,
//!   spillover math
//! - [`resolver`]: loosely-typed table reference resolution across zone
//!   layout snapshots
//! - [`conflict`]: double-booking detection, including prior-day spillover
//! - [`drag`]: pointer-driven move/resize state machine with neighbor
//!   clamping
//! - [`schedule`]: per-table block assembly for one display date

pub mod conflict;
pub mod drag;
pub mod duration;
pub mod interval;
pub mod resolver;
pub mod schedule;

pub use conflict::{ConflictDetector, ConflictInfo, ConflictKind, EditContext};
pub use drag::{DragMode, DragRejected, DragSession, NeighborBounds, TrackGeometry};
pub use duration::estimate_duration;
pub use interval::{
    TimeInterval, effective_interval, format_minute_of_day, parse_time_to_minutes, snap_minutes,
};
pub use resolver::TableResolver;
pub use schedule::{Block, DaySchedule, timeline_tables};
