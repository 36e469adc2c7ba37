//! Default occupancy duration heuristic
//!
//! Derives how long a party is expected to hold a table from its size.
//! Couples get an hour, small groups two, large groups two and a half.
//! Staff can always stretch the window manually afterwards.

use shared::types::Minute;

/// Estimate occupancy duration in minutes from the guest count.
///
/// A missing or non-positive guest count falls back to the 2-guest bucket;
/// reservation data is user-entered and treated permissively.
pub fn estimate_duration(guest_count: Option<i32>) -> Minute {
    let guests = guest_count.filter(|g| *g > 0).unwrap_or(2);
    if guests <= 2 {
        60
    } else if guests <= 4 {
        120
    } else {
        150
    }
}
