//! Double-booking detection
//!
//! Given a candidate occupancy window and the tables it would sit on, scan
//! the loaded reservation snapshot for overlaps. Conflicts are ordinary
//! return values, never errors: the caller turns a [`ConflictInfo`] into a
//! validation message and refuses to save.
//!
//! Checks run per table, in the order the tables were assigned, and stop at
//! the first conflict so error ordering is deterministic. Per table:
//! 1. prior-day spillover: reservations on the previous calendar day whose
//!    window crosses midnight occupy `[0, end - 1440)` of this day
//! 2. same-day regular reservations
//! 3. same-day event reservations
//!
//! The scan is advisory: it reads the in-memory snapshot once at submit
//! time, with no locking against concurrent edits.

use crate::timeline::interval::{TimeInterval, effective_interval};
use crate::timeline::resolver::TableResolver;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{AdjustmentMap, DiningTable, EventReservation, Reservation};
use shared::types::TableRef;
use shared::util::previous_day;
use std::fmt;
use tracing::debug;

/// What kind of entity the candidate collides with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// A previous day's stay that crosses midnight into the candidate's day
    Spillover,
    Reservation,
    EventReservation,
}

/// Structured description of a detected double-booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub table_id: String,
    pub table_label: String,
    pub kind: ConflictKind,
    /// Id of the conflicting reservation or event reservation
    pub entity_id: String,
    pub guest_name: String,
    /// The conflicting window, on the candidate's day
    pub window: TimeInterval,
}

impl fmt::Display for ConflictInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::Spillover => write!(
                f,
                "Table {} is occupied (spillover reservation) from {} - {}",
                self.table_label, self.window, self.guest_name
            ),
            ConflictKind::Reservation => write!(
                f,
                "Table {} is occupied from {} - {}",
                self.table_label, self.window, self.guest_name
            ),
            ConflictKind::EventReservation => write!(
                f,
                "Table {} is occupied (event reservation) from {} - {}",
                self.table_label, self.window, self.guest_name
            ),
        }
    }
}

/// Context for validating an edit to an existing reservation.
///
/// `prior` is the reservation's stored effective window before the edit and
/// `prior_table_refs` the tables it sat on. An overlap that already existed
/// against the same entity on the same table is waived, so users are not
/// locked out of saving by a conflict they (or a colleague) accepted
/// earlier. The waiver is per offending (table, entity) pair; an overlap on
/// a table the reservation did not previously occupy still rejects.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub exclude_id: String,
    pub prior: TimeInterval,
    pub prior_table_refs: Vec<TableRef>,
}

/// Read-only conflict scanner over one day's loaded snapshot
pub struct ConflictDetector<'a> {
    resolver: &'a TableResolver<'a>,
    reservations: &'a [Reservation],
    event_reservations: &'a [EventReservation],
    /// Adjustments for the candidate's date
    adjustments: &'a AdjustmentMap,
    /// Adjustments for the previous calendar day (spillover sources)
    prev_adjustments: &'a AdjustmentMap,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(
        resolver: &'a TableResolver<'a>,
        reservations: &'a [Reservation],
        event_reservations: &'a [EventReservation],
        adjustments: &'a AdjustmentMap,
        prev_adjustments: &'a AdjustmentMap,
    ) -> Self {
        Self {
            resolver,
            reservations,
            event_reservations,
            adjustments,
            prev_adjustments,
        }
    }

    /// Find the first conflict for `candidate` across `table_refs`.
    ///
    /// Tables are checked in assignment order; `None` means the candidate
    /// window is free on every resolvable table. Unresolvable (stale)
    /// references are skipped, not failed.
    pub fn find_conflicts(
        &self,
        candidate: TimeInterval,
        table_refs: &[TableRef],
        date: NaiveDate,
        edit: Option<&EditContext>,
    ) -> Option<ConflictInfo> {
        let zone_hint = Some(self.resolver.target_zone_id());
        for table_ref in table_refs {
            let Some(table) = self.resolver.resolve(table_ref, zone_hint) else {
                continue;
            };
            if let Some(conflict) = self.check_table(candidate, table, date, edit) {
                debug!(
                    table = %conflict.table_label,
                    entity = %conflict.entity_id,
                    kind = ?conflict.kind,
                    "candidate window conflicts"
                );
                return Some(conflict);
            }
        }
        None
    }

    fn check_table(
        &self,
        candidate: TimeInterval,
        table: &DiningTable,
        date: NaiveDate,
        edit: Option<&EditContext>,
    ) -> Option<ConflictInfo> {
        self.check_spillover(candidate, table, date, edit)
            .or_else(|| self.check_regular(candidate, table, date, edit))
            .or_else(|| self.check_events(candidate, table, date, edit))
    }

    /// Step 1: stays from the previous day that cross midnight into `date`
    fn check_spillover(
        &self,
        candidate: TimeInterval,
        table: &DiningTable,
        date: NaiveDate,
        edit: Option<&EditContext>,
    ) -> Option<ConflictInfo> {
        let prev = previous_day(date);

        for r in self.reservations.iter().filter(|r| r.date == prev) {
            if !r.occupies_table() || self.is_excluded(&r.id, edit) {
                continue;
            }
            if !self.on_table(&r.table_refs, r.zone_id.as_deref(), table) {
                continue;
            }
            let window = effective_interval(
                &r.time,
                r.guest_count,
                self.prev_adjustments.get(&r.id),
            );
            let Some(spill) = window.spill_window() else {
                continue;
            };
            if candidate.overlaps(&spill) && !self.waived(edit, table, &spill) {
                return Some(self.conflict(table, ConflictKind::Spillover, &r.id, &r.guest_name, spill));
            }
        }

        for er in self.event_reservations.iter().filter(|er| er.date == prev) {
            if !er.occupies_table() || self.is_excluded(&er.id, edit) {
                continue;
            }
            if !self.on_table(&er.table_refs, er.zone_id.as_deref(), table) {
                continue;
            }
            let window = effective_interval(
                &er.time,
                er.guest_count,
                self.prev_adjustments.get(&er.id),
            );
            let Some(spill) = window.spill_window() else {
                continue;
            };
            if candidate.overlaps(&spill) && !self.waived(edit, table, &spill) {
                return Some(self.conflict(
                    table,
                    ConflictKind::Spillover,
                    &er.id,
                    &er.guest_name,
                    spill,
                ));
            }
        }

        None
    }

    /// Step 2: same-day regular reservations
    fn check_regular(
        &self,
        candidate: TimeInterval,
        table: &DiningTable,
        date: NaiveDate,
        edit: Option<&EditContext>,
    ) -> Option<ConflictInfo> {
        for r in self.reservations.iter().filter(|r| r.date == date) {
            if !r.occupies_table() || self.is_excluded(&r.id, edit) {
                continue;
            }
            if !self.on_table(&r.table_refs, r.zone_id.as_deref(), table) {
                continue;
            }
            let window = effective_interval(&r.time, r.guest_count, self.adjustments.get(&r.id));
            if candidate.overlaps(&window) && !self.waived(edit, table, &window) {
                return Some(self.conflict(
                    table,
                    ConflictKind::Reservation,
                    &r.id,
                    &r.guest_name,
                    window,
                ));
            }
        }
        None
    }

    /// Step 3: same-day event reservations with an active/seated occupancy
    fn check_events(
        &self,
        candidate: TimeInterval,
        table: &DiningTable,
        date: NaiveDate,
        edit: Option<&EditContext>,
    ) -> Option<ConflictInfo> {
        for er in self.event_reservations.iter().filter(|er| er.date == date) {
            if !er.occupies_table() || self.is_excluded(&er.id, edit) {
                continue;
            }
            if !self.on_table(&er.table_refs, er.zone_id.as_deref(), table) {
                continue;
            }
            let window = effective_interval(&er.time, er.guest_count, self.adjustments.get(&er.id));
            if candidate.overlaps(&window) && !self.waived(edit, table, &window) {
                return Some(self.conflict(
                    table,
                    ConflictKind::EventReservation,
                    &er.id,
                    &er.guest_name,
                    window,
                ));
            }
        }
        None
    }

    // ==================== Helpers ====================

    fn is_excluded(&self, id: &str, edit: Option<&EditContext>) -> bool {
        edit.is_some_and(|e| e.exclude_id == id)
    }

    /// Editing exception: the overlap already existed before the edit,
    /// on the same table, against the same entity window.
    fn waived(
        &self,
        edit: Option<&EditContext>,
        table: &DiningTable,
        other_window: &TimeInterval,
    ) -> bool {
        edit.is_some_and(|e| {
            e.prior.overlaps(other_window)
                && self.on_table(&e.prior_table_refs, Some(self.resolver.target_zone_id()), table)
        })
    }

    /// Whether any of `refs` resolves to the given table
    fn on_table(&self, refs: &[TableRef], zone_hint: Option<&str>, table: &DiningTable) -> bool {
        refs.iter().any(|r| {
            self.resolver
                .resolve(r, zone_hint)
                .is_some_and(|t| t.id == table.id)
        })
    }

    fn conflict(
        &self,
        table: &DiningTable,
        kind: ConflictKind,
        entity_id: &str,
        guest_name: &str,
        window: TimeInterval,
    ) -> ConflictInfo {
        ConflictInfo {
            table_id: table.id.clone(),
            table_label: table.label(),
            kind,
            entity_id: entity_id.to_string(),
            guest_name: guest_name.to_string(),
            window,
        }
    }
}
