//! Table-time scheduling and conflict engine
//!
//! An in-process engine for restaurant table timelines: it derives each
//! reservation's occupied `[start, end)` minute window, detects
//! double-bookings (including prior-day spillover past midnight), and turns
//! pointer-driven drag/resize gestures into snapped, neighbor-clamped
//! occupancy windows that are persisted as manual adjustments.
//!
//! The engine owns no rendering and no reservation data; it reads
//! reservations and zone layouts from external sources and persists only
//! the per-reservation adjustments, through [`adjustments::AdjustmentStore`].

pub mod adjustments;
pub mod common;
pub mod core;
pub mod timeline;

// Re-exports
pub use adjustments::{
    AdjustmentBus, AdjustmentService, AdjustmentStore, CommitError, MemoryAdjustmentStore,
    RedbAdjustmentStore,
};
pub use crate::core::EngineConfig;
pub use timeline::{
    ConflictDetector, ConflictInfo, DaySchedule, DragMode, DragSession, TableResolver,
    TimeInterval, effective_interval, estimate_duration,
};
