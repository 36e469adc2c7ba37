//! Adjustment store interface
//!
//! Persists per-reservation manual window overrides keyed by
//! `(date, reservation_id)`. Reads are deliberately infallible: a missing
//! or corrupt day degrades to "no adjustments" so a broken row can never
//! take the timeline down with it.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{Adjustment, AdjustmentMap};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Narrow persistence contract for manual adjustments
#[async_trait]
pub trait AdjustmentStore: Send + Sync {
    /// All adjustments stored for `date`, keyed by reservation id.
    ///
    /// Returns an empty map on no data AND on read/parse failure; never
    /// errors.
    async fn get_for_date(&self, date: NaiveDate) -> AdjustmentMap;

    /// Create or overwrite the adjustment for one reservation. Idempotent.
    async fn upsert(
        &self,
        date: NaiveDate,
        reservation_id: &str,
        adjustment: Adjustment,
    ) -> StoreResult<()>;

    /// Remove the adjustment for one reservation, if present
    async fn remove(&self, date: NaiveDate, reservation_id: &str) -> StoreResult<()>;
}
