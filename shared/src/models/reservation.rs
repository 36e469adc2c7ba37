//! Reservation Models
//!
//! Read-only views of the reservation list service. The engine never
//! creates or mutates these; it derives occupancy windows from them and
//! scans them for conflicts.

use crate::types::TableRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Regular reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Booked, guest not yet here
    PendingArrival,
    /// Booking confirmed by staff
    Confirmed,
    /// Guest is at the table
    Seated,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Whether this status can occupy a table on the timeline
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::PendingArrival
                | ReservationStatus::Confirmed
                | ReservationStatus::Seated
        )
    }
}

/// A guest party's booking for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub date: NaiveDate,
    /// Base arrival time, `HH:MM`; user-entered, so treated permissively
    pub time: String,
    pub guest_name: String,
    pub guest_count: Option<i32>,
    pub status: ReservationStatus,
    /// Raw table references as stored; may be ids, numbers, or names
    #[serde(default)]
    pub table_refs: Vec<TableRef>,
    pub zone_id: Option<String>,
    /// Seated guest has left; the table is free again
    #[serde(default)]
    pub cleared: bool,
}

impl Reservation {
    /// A cleared or cancelled/no-show reservation is never a conflict source
    pub fn occupies_table(&self) -> bool {
        self.status.is_active() && !self.cleared
    }
}

/// Event-sourced reservation status (ticketed events keep their own lifecycle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventReservationStatus {
    /// Seat reserved for the event
    Booked,
    /// Guest is at the table
    Seated,
    Cancelled,
    NoShow,
}

impl EventReservationStatus {
    /// Whether this status denotes an active/seated occupancy
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            EventReservationStatus::Booked | EventReservationStatus::Seated
        )
    }
}

/// A reservation attached to a ticketed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReservation {
    pub id: String,
    pub event_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub guest_name: String,
    pub guest_count: Option<i32>,
    pub status: EventReservationStatus,
    #[serde(default)]
    pub table_refs: Vec<TableRef>,
    pub zone_id: Option<String>,
    #[serde(default)]
    pub cleared: bool,
}

impl EventReservation {
    pub fn occupies_table(&self) -> bool {
        self.status.is_active() && !self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_never_occupies() {
        let mut r = Reservation {
            id: "r-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: "19:00".to_string(),
            guest_name: "Alice".to_string(),
            guest_count: Some(2),
            status: ReservationStatus::Seated,
            table_refs: vec![],
            zone_id: None,
            cleared: false,
        };
        assert!(r.occupies_table());
        r.cleared = true;
        assert!(!r.occupies_table());
        r.cleared = false;
        r.status = ReservationStatus::NoShow;
        assert!(!r.occupies_table());
    }
}
