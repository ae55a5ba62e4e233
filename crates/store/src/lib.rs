//! Persistent store: order-code mappings + scanned-order ledger.
//!
//! One SQLite file, one statement per operation. A `Mutex` serializes
//! connection access so concurrent searches from independent threads never
//! interleave partial writes; no operation spans a multi-row transaction.

mod error;
mod order_codes;
mod scan_state;

pub use error::StoreError;
pub use order_codes::OrderCodeMapping;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS order_codes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_sku TEXT NOT NULL UNIQUE,
    product_name TEXT NOT NULL,
    order_code TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS scanned_orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tracking_number TEXT NOT NULL UNIQUE,
    courier TEXT NOT NULL,
    scanned_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the store at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Store, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Private throwaway database, used by tests.
    pub fn open_in_memory() -> Result<Store, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Store, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-call;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
