//! Data models
//!
//! Read-only views of the reservation list, table/zone layout snapshots,
//! and the persisted manual adjustments. Reservations and layouts are owned
//! by external services; the engine looks them up but never mutates them.

pub mod adjustment;
pub mod dining_table;
pub mod reservation;
pub mod zone;

// Re-exports
pub use adjustment::*;
pub use dining_table::*;
pub use reservation::*;
pub use zone::*;
