//! In-memory adjustment store
//!
//! Backs tests and the fast in-process cache path; nothing survives a
//! restart. Uses the same record shape as the durable store so the two can
//! be swapped behind [`AdjustmentStore`].

use crate::adjustments::store::{AdjustmentStore, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use shared::models::{Adjustment, AdjustmentMap, AdjustmentRecord};
use shared::util::{date_key, now_millis};
use std::collections::HashMap;

/// DashMap-backed adjustment store
#[derive(Debug, Default)]
pub struct MemoryAdjustmentStore {
    /// date key -> reservation id -> record
    days: DashMap<String, HashMap<String, AdjustmentRecord>>,
}

impl MemoryAdjustmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of adjustments stored for `date`
    pub fn len_for_date(&self, date: NaiveDate) -> usize {
        self.days
            .get(&date_key(date))
            .map(|day| day.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl AdjustmentStore for MemoryAdjustmentStore {
    async fn get_for_date(&self, date: NaiveDate) -> AdjustmentMap {
        self.days
            .get(&date_key(date))
            .map(|day| {
                day.iter()
                    .map(|(id, record)| (id.clone(), record.adjustment()))
                    .collect()
            })
            .unwrap_or_default()
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
        self.days
            .entry(date_key(date))
            .or_default()
            .insert(reservation_id.to_string(), record);
        Ok(())
    }

    async fn remove(&self, date: NaiveDate, reservation_id: &str) -> StoreResult<()> {
        if let Some(mut day) = self.days.get_mut(&date_key(date)) {
            day.remove(reservation_id);
        }
        Ok(())
    }
}
