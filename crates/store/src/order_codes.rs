//! Operator-maintained parent-SKU → order-code mappings.

use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use packscan_recon::{EngineError, OrderCodeSource};

use crate::{Store, StoreError};

/// One persisted mapping row.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCodeMapping {
    pub id: i64,
    pub parent_sku: String,
    pub product_name: String,
    pub order_code: String,
    pub created_at: String,
}

impl Store {
    /// Insert-or-replace keyed on `parent_sku`. Last write wins; a replaced
    /// row gets a fresh id and creation time, moving it to the top of the
    /// list.
    pub fn upsert_order_code(
        &self,
        parent_sku: &str,
        product_name: &str,
        order_code: &str,
    ) -> Result<(), StoreError> {
        self.conn().execute(
            "INSERT OR REPLACE INTO order_codes (parent_sku, product_name, order_code) \
             VALUES (?1, ?2, ?3)",
            params![parent_sku, product_name, order_code],
        )?;
        Ok(())
    }

    pub fn get_order_code(&self, parent_sku: &str) -> Result<Option<String>, StoreError> {
        let code = self
            .conn()
            .query_row(
                "SELECT order_code FROM order_codes WHERE parent_sku = ?1",
                params![parent_sku],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code)
    }

    /// All mappings, newest first.
    pub fn list_order_codes(&self) -> Result<Vec<OrderCodeMapping>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, parent_sku, product_name, order_code, created_at \
             FROM order_codes ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(OrderCodeMapping {
                id: row.get(0)?,
                parent_sku: row.get(1)?,
                product_name: row.get(2)?,
                order_code: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Returns false when no row had that id — a soft failure the caller
    /// reports, not a fault.
    pub fn delete_order_code(&self, id: i64) -> Result<bool, StoreError> {
        let changed = self
            .conn()
            .execute("DELETE FROM order_codes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

impl OrderCodeSource for Store {
    fn order_code(&self, parent_sku: &str) -> Result<Option<String>, EngineError> {
        self.get_order_code(parent_sku)
            .map_err(|e| EngineError::Store(e.to_string()))
    }
}
