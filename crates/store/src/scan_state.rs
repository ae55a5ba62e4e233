//! Scanned-order ledger: the single source of truth for "has this package
//! been physically scanned".

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use packscan_recon::{EngineError, ScanLedger};

use crate::{Store, StoreError};

impl Store {
    /// Insert-or-ignore. Returns true when the tracking number was newly
    /// recorded; a duplicate scan is a no-op and the first-seen courier
    /// stays.
    pub fn record_scan(&self, tracking_number: &str, courier: &str) -> Result<bool, StoreError> {
        let changed = self.conn().execute(
            "INSERT OR IGNORE INTO scanned_orders (tracking_number, courier) VALUES (?1, ?2)",
            params![tracking_number, courier],
        )?;
        Ok(changed > 0)
    }

    pub fn scan_exists(&self, tracking_number: &str) -> Result<bool, StoreError> {
        let found = self
            .conn()
            .query_row(
                "SELECT 1 FROM scanned_orders WHERE tracking_number = ?1",
                params![tracking_number],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Every scanned tracking number, in scan order.
    pub fn scanned_tracking(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT tracking_number FROM scanned_orders ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn scanned_count_by_courier(&self) -> Result<HashMap<String, usize>, StoreError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT courier, COUNT(*) FROM scanned_orders GROUP BY courier")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
        })?;
        rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
    }

    /// Deletes all scan state unconditionally.
    pub fn reset_scan_state(&self) -> Result<(), StoreError> {
        self.conn().execute("DELETE FROM scanned_orders", [])?;
        Ok(())
    }
}

impl ScanLedger for Store {
    fn is_scanned(&self, tracking_number: &str) -> Result<bool, EngineError> {
        self.scan_exists(tracking_number)
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    fn mark_scanned(&self, tracking_number: &str, courier: &str) -> Result<bool, EngineError> {
        self.record_scan(tracking_number, courier)
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    fn scanned_tracking_numbers(&self) -> Result<Vec<String>, EngineError> {
        self.scanned_tracking()
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    fn count_by_courier(&self) -> Result<HashMap<String, usize>, EngineError> {
        self.scanned_count_by_courier()
            .map_err(|e| EngineError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_scan_is_a_no_op_first_courier_wins() {
        let store = Store::open_in_memory().unwrap();

        assert!(store.record_scan("PH123", "JNT").unwrap());
        assert!(!store.record_scan("PH123", "Flash").unwrap());

        let counts = store.scanned_count_by_courier().unwrap();
        assert_eq!(counts.get("JNT"), Some(&1));
        assert_eq!(counts.get("Flash"), None);
        assert_eq!(store.scanned_tracking().unwrap(), vec!["PH123"]);
    }

    #[test]
    fn counts_group_by_exact_courier_string() {
        let store = Store::open_in_memory().unwrap();
        store.record_scan("PH1", "J&T Express").unwrap();
        store.record_scan("PH2", "J&T Express").unwrap();
        store.record_scan("PH3", "j&t express").unwrap();

        let counts = store.scanned_count_by_courier().unwrap();
        assert_eq!(counts.get("J&T Express"), Some(&2));
        assert_eq!(counts.get("j&t express"), Some(&1));
    }

    #[test]
    fn reset_clears_everything() {
        let store = Store::open_in_memory().unwrap();
        store.record_scan("PH1", "JNT").unwrap();
        store.record_scan("PH2", "Flash").unwrap();

        store.reset_scan_state().unwrap();

        assert!(store.scanned_count_by_courier().unwrap().is_empty());
        assert!(!store.scan_exists("PH1").unwrap());
        assert!(!store.scan_exists("PH2").unwrap());
        assert!(store.scanned_tracking().unwrap().is_empty());
    }

    #[test]
    fn tracking_membership_is_exact_case() {
        let store = Store::open_in_memory().unwrap();
        store.record_scan("PH1A", "JNT").unwrap();
        assert!(store.scan_exists("PH1A").unwrap());
        assert!(!store.scan_exists("ph1a").unwrap());
    }
}
