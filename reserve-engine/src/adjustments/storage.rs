//! redb-based durable adjustment store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `adjustments` | `(date, reservation_id)` | `AdjustmentRecord` | Manual window overrides |
//!
//! Values are JSON-serialized [`AdjustmentRecord`]s. redb commits are
//! durable as soon as `commit()` returns (copy-on-write with atomic pointer
//! swap), which matters on front-of-house machines that get powered off
//! without ceremony.
//!
//! Reads follow the degrade-to-empty policy: a failed read or an
//! unparseable row yields no adjustments for that reservation, logged at
//! `warn`, never an error to the caller.

use crate::adjustments::store::{AdjustmentStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{Adjustment, AdjustmentMap, AdjustmentRecord};
use shared::util::{date_key, now_millis};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Table for adjustments: key = (date, reservation_id), value = JSON record
const ADJUSTMENTS_TABLE: TableDefinition<(&str, &str), &[u8]> =
    TableDefinition::new("adjustments");

/// Adjustment storage backed by redb
#[derive(Debug, Clone)]
pub struct RedbAdjustmentStore {
    db: Arc<Database>,
}

impl RedbAdjustmentStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Initialize the table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ADJUSTMENTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ADJUSTMENTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_day(&self, date: NaiveDate) -> StoreResult<AdjustmentMap> {
        let key = date_key(date);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ADJUSTMENTS_TABLE)?;

        let mut map = AdjustmentMap::new();
        for result in table.range((key.as_str(), "")..)? {
            let (k, v) = result?;
            if k.value().0 != key {
                break;
            }
            match serde_json::from_slice::<AdjustmentRecord>(v.value()) {
                Ok(record) => {
                    map.insert(record.reservation_id.clone(), record.adjustment());
                }
                Err(err) => {
                    warn!(
                        date = %key,
                        reservation_id = k.value().1,
                        error = %err,
                        "skipping unparseable adjustment row"
                    );
                }
            }
        }
        Ok(map)
    }

    fn write(&self, date: NaiveDate, record: &AdjustmentRecord) -> StoreResult<()> {
        let key = date_key(date);
        let value = serde_json::to_vec(record)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ADJUSTMENTS_TABLE)?;
            table.insert((key.as_str(), record.reservation_id.as_str()), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn delete(&self, date: NaiveDate, reservation_id: &str) -> StoreResult<()> {
        let key = date_key(date);
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ADJUSTMENTS_TABLE)?;
            table.remove((key.as_str(), reservation_id))?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl AdjustmentStore for RedbAdjustmentStore {
    async fn get_for_date(&self, date: NaiveDate) -> AdjustmentMap {
        match self.read_day(date) {
            Ok(map) => map,
            Err(err) => {
                warn!(date = %date_key(date), error = %err, "adjustment read failed; treating day as empty");
                AdjustmentMap::new()
            }
        }
    }

    async fn upsert(
        &self,
        date: NaiveDate,
        reservation_id: &str,
        adjustment: Adjustment,
    ) -> StoreResult<()> {
        let record = AdjustmentRecord {
            reservation_id: reservation_id.to_string(),
            start_min: adjustment.start_min,
            end_min: adjustment.end_min,
            updated_at: now_millis(),
        };
        self.write(date, &record)
    }

    async fn remove(&self, date: NaiveDate, reservation_id: &str) -> StoreResult<()> {
        self.delete(date, reservation_id)
    }
}
