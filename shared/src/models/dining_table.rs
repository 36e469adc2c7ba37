//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Floor-plan element kind. Chairs share the table data shape but never
/// carry reservations and never appear on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    #[default]
    Table,
    Chair,
}

/// Dining table entity, as it appears in a zone layout snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    /// Layout-snapshot id; recreated whenever the floor plan is re-saved
    pub id: String,
    /// Display number shown on the floor plan
    pub number: Option<u32>,
    /// Optional display name ("Window booth")
    pub name: Option<String>,
    pub zone_id: String,
    #[serde(default)]
    pub kind: TableKind,
}

impl DiningTable {
    /// Label used in user-facing conflict messages: name, else number, else id
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        match self.number {
            Some(n) => n.to_string(),
            None => self.id.clone(),
        }
    }

    /// Stable key used to group timeline blocks: number when present, else id
    pub fn row_key(&self) -> String {
        match self.number {
            Some(n) => n.to_string(),
            None => self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(number: Option<u32>, name: Option<&str>) -> DiningTable {
        DiningTable {
            id: "t-1".to_string(),
            number,
            name: name.map(str::to_string),
            zone_id: "z-1".to_string(),
            kind: TableKind::Table,
        }
    }

    #[test]
    fn test_label_prefers_name() {
        assert_eq!(table(Some(5), Some("Window booth")).label(), "Window booth");
        assert_eq!(table(Some(5), Some("  ")).label(), "5");
        assert_eq!(table(None, None).label(), "t-1");
    }
}
