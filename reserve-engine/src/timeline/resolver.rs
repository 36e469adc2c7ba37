//! Table reference resolution across zone layout snapshots
//!
//! Reservations store loosely-typed table references: a layout-snapshot id,
//! a display number, or (rarely) a display name. Zone layouts are recreated
//! wholesale when staff edit the floor plan, so a stored id may belong to a
//! snapshot that no longer exists while the physical table is still there
//! under a fresh id. A strict single-path lookup would spuriously drop valid
//! assignments; this resolver instead runs an explicit prioritized strategy
//! list and only then gives up.
//!
//! Resolution order (first match wins):
//! 1. exact id match within the target zone
//! 2. display-number match within the target zone (numeric refs only)
//! 3. find the table anywhere by id or number, then re-match by that
//!    table's number or name within the target zone
//! 4. if the reservation's own zone IS the target zone, retry the number
//!    match once more (tolerates transient layout-cache staleness)
//!
//! `None` means the reference is stale or the table was deleted; callers
//! skip that table rather than failing the whole operation.

use shared::models::{DiningTable, ZoneLayouts};
use shared::types::TableRef;
use tracing::trace;

/// Resolves raw table references onto a target (displayed) zone
pub struct TableResolver<'a> {
    layouts: &'a ZoneLayouts,
    target_zone_id: &'a str,
}

impl<'a> TableResolver<'a> {
    pub fn new(layouts: &'a ZoneLayouts, target_zone_id: &'a str) -> Self {
        Self {
            layouts,
            target_zone_id,
        }
    }

    /// The zone this resolver maps references onto
    pub fn target_zone_id(&self) -> &str {
        self.target_zone_id
    }

    /// Tables of the target zone, in layout order
    pub fn target_tables(&self) -> &'a [DiningTable] {
        self.layouts
            .get(self.target_zone_id)
            .map(|layout| layout.tables.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve `table_ref` to a table in the target zone.
    ///
    /// `zone_hint` is the zone the owning reservation belongs to, when known.
    pub fn resolve(&self, table_ref: &TableRef, zone_hint: Option<&str>) -> Option<&'a DiningTable> {
        let found = self
            .match_id_in_target(table_ref)
            .or_else(|| self.match_number_in_target(table_ref))
            .or_else(|| self.match_anywhere_then_rematch(table_ref))
            .or_else(|| self.retry_with_zone_hint(table_ref, zone_hint));
        if found.is_none() {
            trace!(
                table_ref = %table_ref,
                zone = self.target_zone_id,
                "table reference did not resolve; treating as stale"
            );
        }
        found
    }

    // ==================== Strategies ====================

    /// Strategy 1: exact id match in the target zone (name match for
    /// explicit by-name references)
    fn match_id_in_target(&self, table_ref: &TableRef) -> Option<&'a DiningTable> {
        if let TableRef::ByName(name) = table_ref {
            return self
                .target_tables()
                .iter()
                .find(|t| t.name.as_deref() == Some(name.as_str()));
        }
        let raw = table_ref.raw();
        self.target_tables().iter().find(|t| t.id == raw)
    }

    /// Strategy 2: display-number match in the target zone
    fn match_number_in_target(&self, table_ref: &TableRef) -> Option<&'a DiningTable> {
        let number = table_ref.number()?;
        self.find_by_number(self.target_tables(), number)
    }

    /// Strategy 3: locate the table in ANY zone by id or number to learn its
    /// number/name, then re-match that within the target zone. Handles the
    /// physical table having been recreated in a different layout snapshot.
    fn match_anywhere_then_rematch(&self, table_ref: &TableRef) -> Option<&'a DiningTable> {
        let raw = table_ref.raw();
        let anywhere = self
            .all_tables()
            .find(|t| t.id == raw)
            .or_else(|| {
                let number = table_ref.number()?;
                self.all_tables().find(|t| t.number == Some(number))
            })?;

        if let Some(number) = anywhere.number {
            if let Some(found) = self.find_by_number(self.target_tables(), number) {
                return Some(found);
            }
        }
        let name = anywhere.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        self.target_tables()
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
    }

    /// Strategy 4: zone-hint retry for numeric refs
    fn retry_with_zone_hint(
        &self,
        table_ref: &TableRef,
        zone_hint: Option<&str>,
    ) -> Option<&'a DiningTable> {
        if zone_hint != Some(self.target_zone_id) {
            return None;
        }
        let number = table_ref.number()?;
        self.find_by_number(self.target_tables(), number)
    }

    // ==================== Helpers ====================

    fn all_tables(&self) -> impl Iterator<Item = &'a DiningTable> {
        self.layouts.values().flat_map(|layout| layout.tables.iter())
    }

    fn find_by_number(&self, tables: &'a [DiningTable], number: u32) -> Option<&'a DiningTable> {
        tables.iter().find(|t| t.number == Some(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{TableKind, ZoneLayout};

    fn table(id: &str, number: Option<u32>, name: Option<&str>, zone: &str) -> DiningTable {
        DiningTable {
            id: id.to_string(),
            number,
            name: name.map(str::to_string),
            zone_id: zone.to_string(),
            kind: TableKind::Table,
        }
    }

    fn layouts() -> ZoneLayouts {
        let mut layouts = ZoneLayouts::new();
        layouts.insert(
            "hall".to_string(),
            ZoneLayout {
                tables: vec![
                    table("h-1", Some(1), None, "hall"),
                    table("h-5", Some(5), Some("Window booth"), "hall"),
                ],
            },
        );
        layouts.insert(
            "terrace".to_string(),
            ZoneLayout {
                tables: vec![
                    table("t-5", Some(5), Some("Window booth"), "terrace"),
                    table("t-9", Some(9), None, "terrace"),
                ],
            },
        );
        layouts
    }

    #[test]
    fn test_exact_id_in_target_zone() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        let found = resolver.resolve(&TableRef::ById("h-5".into()), None).unwrap();
        assert_eq!(found.id, "h-5");
    }

    #[test]
    fn test_number_in_target_zone() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        let found = resolver.resolve(&TableRef::parse("5"), None).unwrap();
        assert_eq!(found.id, "h-5");
    }

    #[test]
    fn test_foreign_id_rematches_by_number() {
        // Reservation still carries the terrace snapshot's id for table 5;
        // the hall layout has its own copy under a different id.
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        let found = resolver.resolve(&TableRef::ById("t-5".into()), None).unwrap();
        assert_eq!(found.id, "h-5");
    }

    #[test]
    fn test_foreign_id_rematches_by_name() {
        let mut layouts = layouts();
        // Remove the number from the hall copy so only the name can match
        layouts.get_mut("hall").unwrap().tables[1].number = None;
        let resolver = TableResolver::new(&layouts, "hall");
        let found = resolver.resolve(&TableRef::ById("t-5".into()), None).unwrap();
        assert_eq!(found.id, "h-5");
    }

    #[test]
    fn test_by_name_ref_matches_in_target_zone() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        let found = resolver
            .resolve(&TableRef::ByName("Window booth".into()), None)
            .unwrap();
        assert_eq!(found.id, "h-5");
    }

    #[test]
    fn test_stale_reference_returns_none() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        assert!(resolver.resolve(&TableRef::ById("gone".into()), None).is_none());
        assert!(resolver.resolve(&TableRef::parse("42"), None).is_none());
    }

    #[test]
    fn test_number_only_in_other_zone_stays_unresolved() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "hall");
        // Table 9 exists only on the terrace; strategy 3 finds it there but
        // cannot re-match it in the hall.
        assert!(resolver.resolve(&TableRef::parse("9"), None).is_none());
    }

    #[test]
    fn test_unknown_target_zone_is_empty() {
        let layouts = layouts();
        let resolver = TableResolver::new(&layouts, "garden");
        assert!(resolver.resolve(&TableRef::parse("5"), None).is_none());
        assert!(resolver.target_tables().is_empty());
    }
}
