//! Manual adjustment persistence and change notification
//!
//! The engine persists exactly one thing: per-reservation manual window
//! overrides, keyed by `(date, reservation_id)`. [`AdjustmentStore`] is the
//! narrow interface the engine needs; [`MemoryAdjustmentStore`] backs tests
//! and fast in-process caches, [`RedbAdjustmentStore`] is the durable
//! on-disk implementation. [`AdjustmentService`] is the commit seam used on
//! drag release, and [`AdjustmentBus`] fans committed changes out to every
//! subscribed view.

pub mod bus;
pub mod memory;
pub mod service;
pub mod storage;
pub mod store;

pub use bus::AdjustmentBus;
pub use memory::MemoryAdjustmentStore;
pub use service::{AdjustmentService, CommitError};
pub use storage::RedbAdjustmentStore;
pub use store::{AdjustmentStore, StoreError, StoreResult};
