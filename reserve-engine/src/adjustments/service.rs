//! Two-phase adjustment commit
//!
//! Proposing a window is local and synchronous (the drag session's
//! candidate); committing it is asynchronous: validate, upsert into the
//! store, then broadcast the change so other views reload. Commits are
//! idempotent: replaying the same drag result overwrites the row with
//! identical values.
//!
//! On a store failure the committed value is NOT rolled back anywhere: the
//! caller's live preview stays as-is and the error is surfaced for a
//! non-fatal warning. No automatic retry.

use crate::adjustments::bus::AdjustmentBus;
use crate::adjustments::store::{AdjustmentStore, StoreError};
use crate::timeline::duration::estimate_duration;
use crate::timeline::interval::TimeInterval;
use chrono::NaiveDate;
use shared::error::AppError;
use shared::message::{AdjustmentsChanged, EngineEvent};
use shared::models::{Adjustment, AdjustmentMap};
use shared::types::{DAY_MINUTES, MAX_SPILL_MINUTES, Minute};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a commit did not persist
#[derive(Debug, Error)]
pub enum CommitError {
    /// The window violates an adjustment invariant; nothing was written
    #[error(transparent)]
    Invalid(#[from] AppError),
    /// The store rejected the write; the in-memory value remains live
    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Commit seam between drag gestures and the adjustment store
#[derive(Clone)]
pub struct AdjustmentService {
    store: Arc<dyn AdjustmentStore>,
    bus: AdjustmentBus,
    /// Identifies this view in published events so it can skip its own echo
    source: Option<String>,
}

impl AdjustmentService {
    pub fn new(store: Arc<dyn AdjustmentStore>, bus: AdjustmentBus) -> Self {
        Self {
            store,
            bus,
            source: None,
        }
    }

    /// Tag published events with a view identity
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn bus(&self) -> &AdjustmentBus {
        &self.bus
    }

    /// Adjustments stored for `date` (empty on missing/corrupt data)
    pub async fn adjustments_for(&self, date: NaiveDate) -> AdjustmentMap {
        self.store.get_for_date(date).await
    }

    /// Persist a drag result and notify subscribers.
    ///
    /// Validation failures mean nothing was written. Store failures mean
    /// the caller should keep its optimistic preview and surface a warning;
    /// this service neither retries nor rolls back.
    pub async fn commit(
        &self,
        date: NaiveDate,
        reservation_id: &str,
        window: TimeInterval,
    ) -> Result<(), CommitError> {
        let adjustment = Adjustment::new(window.start_min, window.end_min);
        adjustment.validate()?;

        if let Err(err) = self.store.upsert(date, reservation_id, adjustment).await {
            warn!(
                %date,
                reservation_id,
                error = %err,
                "adjustment commit failed; keeping optimistic value"
            );
            return Err(err.into());
        }

        debug!(%date, reservation_id, start = window.start_min, end = window.end_min, "adjustment committed");
        self.notify(date);
        Ok(())
    }

    /// Explicit "extend to next day": keep the start, push the end
    /// `spill_end_min` minutes past midnight (e.g. 30 for 00:30).
    pub async fn extend_to_next_day(
        &self,
        date: NaiveDate,
        reservation_id: &str,
        start_min: Minute,
        spill_end_min: Minute,
    ) -> Result<(), CommitError> {
        if spill_end_min <= 0 || spill_end_min > MAX_SPILL_MINUTES {
            return Err(AppError::invalid_interval("next-day end outside the spillover window")
                .with_detail("spill_end_min", spill_end_min)
                .into());
        }
        self.commit(
            date,
            reservation_id,
            TimeInterval::new(start_min, DAY_MINUTES + spill_end_min),
        )
        .await
    }

    /// Undo a next-day extension: restore the default guest-count window.
    ///
    /// A no-op when the stored adjustment does not spill over.
    pub async fn clear_spillover(
        &self,
        date: NaiveDate,
        reservation_id: &str,
        start_min: Minute,
        guest_count: Option<i32>,
    ) -> Result<(), CommitError> {
        let stored = self.store.get_for_date(date).await;
        let Some(adjustment) = stored.get(reservation_id) else {
            return Ok(());
        };
        if !adjustment.spills_over() {
            return Ok(());
        }
        let default_end = (start_min + estimate_duration(guest_count)).min(DAY_MINUTES);
        self.commit(date, reservation_id, TimeInterval::new(start_min, default_end))
            .await
    }

    fn notify(&self, date: NaiveDate) {
        let payload = match &self.source {
            Some(source) => AdjustmentsChanged::with_source(date, source.clone()),
            None => AdjustmentsChanged::new(date),
        };
        self.bus.publish(EngineEvent::adjustments_changed(payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::memory::MemoryAdjustmentStore;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn service() -> AdjustmentService {
        AdjustmentService::new(
            Arc::new(MemoryAdjustmentStore::new()),
            AdjustmentBus::with_capacity(16),
        )
        .with_source("timeline")
    }

    #[tokio::test]
    async fn test_commit_persists_and_notifies() {
        let service = service();
        let mut rx = service.bus().subscribe();

        service
            .commit(day(), "r-1", TimeInterval::new(1140, 1265))
            .await
            .unwrap();

        let map = service.adjustments_for(day()).await;
        assert_eq!(map.get("r-1"), Some(&Adjustment::new(1140, 1265)));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.payload.date, day());
        assert_eq!(event.payload.source.as_deref(), Some("timeline"));
    }

    #[tokio::test]
    async fn test_commit_twice_is_idempotent() {
        let service = service();
        let window = TimeInterval::new(1140, 1265);
        service.commit(day(), "r-1", window).await.unwrap();
        let first = service.adjustments_for(day()).await;
        service.commit(day(), "r-1", window).await.unwrap();
        let second = service.adjustments_for(day()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_commit_rejects_invalid_window() {
        let service = service();
        let err = service
            .commit(day(), "r-1", TimeInterval::new(600, 605))
            .await
            .unwrap_err();
        assert!(matches!(err, CommitError::Invalid(_)));
        assert!(service.adjustments_for(day()).await.is_empty());
    }

    #[tokio::test]
    async fn test_extend_to_next_day() {
        let service = service();
        service
            .extend_to_next_day(day(), "r-1", 1380, 30)
            .await
            .unwrap();

        let map = service.adjustments_for(day()).await;
        let adjustment = map.get("r-1").unwrap();
        assert_eq!(adjustment.end_min, 1470);
        assert!(adjustment.spills_over());

        // Out-of-window extensions are refused
        assert!(service.extend_to_next_day(day(), "r-2", 1380, 0).await.is_err());
        assert!(service.extend_to_next_day(day(), "r-2", 1380, 400).await.is_err());
    }

    #[tokio::test]
    async fn test_clear_spillover_restores_default_window() {
        let service = service();
        service
            .extend_to_next_day(day(), "r-1", 1380, 30)
            .await
            .unwrap();

        // 5 guests → 150 minutes, capped at midnight
        service
            .clear_spillover(day(), "r-1", 1380, Some(5))
            .await
            .unwrap();

        let map = service.adjustments_for(day()).await;
        assert_eq!(map.get("r-1"), Some(&Adjustment::new(1380, 1440)));

        // Clearing a non-spilling or missing adjustment is a no-op
        service.clear_spillover(day(), "r-1", 1380, Some(5)).await.unwrap();
        service.clear_spillover(day(), "ghost", 1200, None).await.unwrap();
    }
}
