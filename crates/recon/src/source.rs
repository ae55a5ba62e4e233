//! Seams between the engine and its collaborators.
//!
//! The engine never opens files or databases itself: spreadsheets arrive
//! through [`SheetSource`], the order-code mapping through
//! [`OrderCodeSource`], and scan state through [`ScanLedger`]. Production
//! wiring lives in `packscan-io` and `packscan-store`.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::table::SheetTable;

/// Provider of normalized spreadsheet data.
///
/// Implementations re-read the backing files on every call; the engine
/// holds no workbook cache, trading re-parse cost for freshness.
pub trait SheetSource {
    /// Spreadsheet files currently visible, by display name.
    fn list_files(&self) -> Result<Vec<String>, EngineError>;
    /// All sheets of one file, normalized.
    fn load_sheets(&self, file: &str) -> Result<Vec<SheetTable>, EngineError>;
}

/// Read side of the operator-maintained parent-SKU → order-code mapping.
pub trait OrderCodeSource {
    fn order_code(&self, parent_sku: &str) -> Result<Option<String>, EngineError>;
}

/// The single source of truth for "has this package been scanned".
pub trait ScanLedger {
    fn is_scanned(&self, tracking_number: &str) -> Result<bool, EngineError>;

    /// Insert-or-ignore. Returns `true` when the tracking number was newly
    /// recorded, `false` when it had already been scanned (first-seen
    /// courier wins; the duplicate is a no-op).
    fn mark_scanned(&self, tracking_number: &str, courier: &str) -> Result<bool, EngineError>;

    fn scanned_tracking_numbers(&self) -> Result<Vec<String>, EngineError>;

    /// Scanned counts keyed by the courier string recorded at scan time.
    fn count_by_courier(&self) -> Result<HashMap<String, usize>, EngineError>;
}

/// Fixed in-memory sheet set. Backs the engine tests and any caller that
/// already holds loaded tables.
pub struct StaticSource {
    tables: Vec<SheetTable>,
}

impl StaticSource {
    pub fn new(tables: Vec<SheetTable>) -> Self {
        StaticSource { tables }
    }
}

impl SheetSource for StaticSource {
    fn list_files(&self) -> Result<Vec<String>, EngineError> {
        let mut files: Vec<String> = Vec::new();
        for table in &self.tables {
            if !files.contains(&table.source) {
                files.push(table.source.clone());
            }
        }
        Ok(files)
    }

    fn load_sheets(&self, file: &str) -> Result<Vec<SheetTable>, EngineError> {
        Ok(self
            .tables
            .iter()
            .filter(|t| t.source == file)
            .cloned()
            .collect())
    }
}
