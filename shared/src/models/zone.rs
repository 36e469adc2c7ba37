//! Zone Model

use super::dining_table::DiningTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Zone entity (dining room, terrace, private room, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// One saved floor-plan snapshot for a zone.
///
/// Layouts are re-saved wholesale when staff edit the floor plan, which
/// recreates table ids. Table references stored on reservations may
/// therefore point at ids from an older snapshot; the resolver bridges
/// that gap by falling back to display numbers and names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneLayout {
    #[serde(default)]
    pub tables: Vec<DiningTable>,
}

/// All zone layouts currently loaded, keyed by zone id
pub type ZoneLayouts = HashMap<String, ZoneLayout>;
