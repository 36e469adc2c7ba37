//! Per-table block assembly for one display date
//!
//! Collects everything that occupies a table on a given day into sorted
//! per-table block lists: active same-day reservations, active same-day
//! event reservations, and stays from the previous day that spill past
//! midnight. Spillover blocks are materialized at `[0, spill_end)` and
//! flagged read-only: their persisted adjustment lives on the source day,
//! so they are stretched or shifted only from there.

use crate::timeline::interval::{TimeInterval, effective_interval};
use crate::timeline::resolver::TableResolver;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    AdjustmentMap, DiningTable, EventReservation, Reservation, ReservationStatus, TableKind,
};
use shared::models::EventReservationStatus;
use shared::types::{DAY_MINUTES, MIN_BLOCK_MINUTES};
use shared::util::previous_day;
use std::collections::HashMap;

/// One occupied stretch on a table's timeline row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub reservation_id: String,
    pub guest_name: String,
    pub guest_count: i32,
    pub interval: TimeInterval,
    /// Guest is currently at the table; the block's start is locked
    pub seated: bool,
    /// Belongs to a ticketed event
    pub event: bool,
    /// Materialized from the previous day's stay; read-only on this day
    pub spillover: bool,
}

/// All blocks for one display date, grouped per table row
#[derive(Debug, Clone, Default)]
pub struct DaySchedule {
    blocks_by_table: HashMap<String, Vec<Block>>,
    reserved_guests: HashMap<String, i32>,
}

impl DaySchedule {
    /// Assemble the schedule for `date` from the loaded snapshot.
    ///
    /// `adjustments` belong to `date`, `prev_adjustments` to the previous
    /// calendar day (the source of spillover windows). Raw table references
    /// are resolved onto the resolver's target zone; stale references are
    /// skipped.
    pub fn build(
        date: NaiveDate,
        reservations: &[Reservation],
        event_reservations: &[EventReservation],
        adjustments: &AdjustmentMap,
        prev_adjustments: &AdjustmentMap,
        resolver: &TableResolver<'_>,
    ) -> Self {
        let prev = previous_day(date);
        let mut schedule = DaySchedule::default();

        for r in reservations {
            if !r.occupies_table() {
                continue;
            }
            if r.date == date {
                let interval = effective_interval(&r.time, r.guest_count, adjustments.get(&r.id));
                let block = Block {
                    reservation_id: r.id.clone(),
                    guest_name: r.guest_name.clone(),
                    guest_count: r.guest_count.unwrap_or(0),
                    interval,
                    seated: r.status == ReservationStatus::Seated,
                    event: false,
                    spillover: false,
                };
                schedule.place(&block, &r.table_refs, r.zone_id.as_deref(), resolver);
            } else if r.date == prev {
                let window =
                    effective_interval(&r.time, r.guest_count, prev_adjustments.get(&r.id));
                if let Some(interval) = spill_block_interval(&window, adjustments.get(&r.id)) {
                    let block = Block {
                        reservation_id: r.id.clone(),
                        guest_name: r.guest_name.clone(),
                        guest_count: r.guest_count.unwrap_or(0),
                        interval,
                        seated: r.status == ReservationStatus::Seated,
                        event: false,
                        spillover: true,
                    };
                    schedule.place(&block, &r.table_refs, r.zone_id.as_deref(), resolver);
                }
            }
        }

        for er in event_reservations {
            if !er.occupies_table() {
                continue;
            }
            if er.date == date {
                let interval =
                    effective_interval(&er.time, er.guest_count, adjustments.get(&er.id));
                let block = Block {
                    reservation_id: er.id.clone(),
                    guest_name: er.guest_name.clone(),
                    guest_count: er.guest_count.unwrap_or(0),
                    interval,
                    seated: er.status == EventReservationStatus::Seated,
                    event: true,
                    spillover: false,
                };
                schedule.place(&block, &er.table_refs, er.zone_id.as_deref(), resolver);
            } else if er.date == prev {
                let window =
                    effective_interval(&er.time, er.guest_count, prev_adjustments.get(&er.id));
                if let Some(interval) = spill_block_interval(&window, adjustments.get(&er.id)) {
                    let block = Block {
                        reservation_id: er.id.clone(),
                        guest_name: er.guest_name.clone(),
                        guest_count: er.guest_count.unwrap_or(0),
                        interval,
                        seated: er.status == EventReservationStatus::Seated,
                        event: true,
                        spillover: true,
                    };
                    schedule.place(&block, &er.table_refs, er.zone_id.as_deref(), resolver);
                }
            }
        }

        for blocks in schedule.blocks_by_table.values_mut() {
            blocks.sort_by_key(|b| b.interval.start_min);
        }
        schedule
    }

    fn place(
        &mut self,
        block: &Block,
        refs: &[shared::types::TableRef],
        zone_hint: Option<&str>,
        resolver: &TableResolver<'_>,
    ) {
        for table_ref in refs {
            let Some(table) = resolver.resolve(table_ref, zone_hint) else {
                continue;
            };
            let key = table.row_key();
            self.blocks_by_table
                .entry(key.clone())
                .or_default()
                .push(block.clone());
            *self.reserved_guests.entry(key).or_insert(0) += block.guest_count;
        }
    }

    /// Blocks on this table's row, sorted by start
    pub fn blocks_for(&self, table: &DiningTable) -> &[Block] {
        self.blocks_by_table
            .get(&table.row_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total reserved guests on this table for the day
    pub fn reserved_guests(&self, table: &DiningTable) -> i32 {
        self.reserved_guests
            .get(&table.row_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks_by_table.is_empty()
    }
}

/// Tables shown as timeline rows: real tables only (no chairs), ordered by
/// display number.
pub fn timeline_tables<'a>(resolver: &TableResolver<'a>) -> Vec<&'a DiningTable> {
    let mut tables: Vec<&DiningTable> = resolver
        .target_tables()
        .iter()
        .filter(|t| t.kind != TableKind::Chair)
        .collect();
    tables.sort_by_key(|t| t.number.unwrap_or(0));
    tables
}

/// The `[0, end)` interval a spillover block occupies on the spill day.
///
/// A stale adjustment row stored under the SPILL day's date (the persisted
/// one lives on the source day) must not stretch the block: it is honored
/// only when it stays inside this day and does not fabricate a full-day
/// stretch the source window never reached.
fn spill_block_interval(
    source_window: &TimeInterval,
    same_day_adjustment: Option<&shared::models::Adjustment>,
) -> Option<TimeInterval> {
    let spill = source_window.spill_window()?;
    let default_end = spill.end_min;
    let safe_adj_end = same_day_adjustment
        .map(|a| a.end_min)
        .filter(|e| (0..=DAY_MINUTES).contains(e) && (default_end == DAY_MINUTES || *e < DAY_MINUTES));
    let end = safe_adj_end
        .unwrap_or(default_end)
        .clamp(MIN_BLOCK_MINUTES, DAY_MINUTES);
    Some(TimeInterval::new(0, end))
}
