//! Adjustment change-notification bus
//!
//! A thin broadcast channel carrying [`EngineEvent`]s. Views subscribe once
//! and reload the affected date when a change lands; nothing polls. The
//! bus replaces the original ambient per-window events with an owned,
//! explicit publish/subscribe seam.

use shared::message::EngineEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Broadcast bus for adjustment change events
#[derive(Debug, Clone)]
pub struct AdjustmentBus {
    tx: broadcast::Sender<EngineEvent>,
}

impl AdjustmentBus {
    /// Create a bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a bus sized from the engine configuration
    pub fn from_config(config: &crate::core::EngineConfig) -> Self {
        Self::with_capacity(config.channel_capacity)
    }

    /// Publish an event to all subscribers.
    ///
    /// Having no subscribers is normal (single-view sessions) and is not an
    /// error; slow subscribers that lag simply miss old events.
    pub fn publish(&self, event: EngineEvent) {
        match self.tx.send(event) {
            Ok(receivers) => trace!(receivers, "adjustment event published"),
            Err(_) => trace!("adjustment event dropped: no subscribers"),
        }
    }

    /// Subscribe to future adjustment changes
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AdjustmentBus {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::message::{AdjustmentsChanged, EventKind};

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let bus = AdjustmentBus::with_capacity(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        bus.publish(EngineEvent::adjustments_changed(AdjustmentsChanged::new(date)));

        for rx in [&mut rx1, &mut rx2] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.kind, EventKind::AdjustmentsChanged);
            assert_eq!(event.payload.date, date);
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let bus = AdjustmentBus::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        bus.publish(EngineEvent::adjustments_changed(AdjustmentsChanged::new(date)));
        assert_eq!(bus.receiver_count(), 0);
    }
}
