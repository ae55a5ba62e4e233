//! Reconciliation search: resolve a tracking number against every loaded
//! spreadsheet, annotate with order codes, record the scan.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::columns::ResolvedColumns;
use crate::error::EngineError;
use crate::extract::{extract_row, is_leaked_junk, AddressColumns};
use crate::model::{MergeKey, OrderRow, SearchOutcome};
use crate::order_code::format_order_code;
use crate::platform::{junk_row_skip, Platform};
use crate::source::{OrderCodeSource, ScanLedger, SheetSource};
use crate::stats::compute_stats;

/// Run one search request.
///
/// Tracking comparison is trimmed and case-insensitive on both sides.
/// Unreadable files are skipped with a warning; a sheet without a
/// resolvable tracking column is skipped silently (it cannot match).
/// When at least one row matches, the scan is recorded idempotently under
/// the first row's courier, and `already_scanned` reports whether the
/// tracking number was present before this call.
pub fn search<S, C, L>(
    source: &S,
    codes: &C,
    ledger: &L,
    tracking_number: &str,
) -> Result<SearchOutcome, EngineError>
where
    S: SheetSource,
    C: OrderCodeSource,
    L: ScanLedger,
{
    let query = tracking_number.trim();
    let needle = query.to_lowercase();
    let mut warnings = Vec::new();

    let files = source.list_files()?;
    if files.is_empty() {
        return Ok(SearchOutcome::no_data(query));
    }

    let mut rows: Vec<OrderRow> = Vec::new();
    for file in &files {
        let tables = match source.load_sheets(file) {
            Ok(tables) => tables,
            Err(e) => {
                warnings.push(format!("skipped {file}: {e}"));
                continue;
            }
        };

        for table in &tables {
            let cols = ResolvedColumns::resolve(&table.headers);
            let Some(tracking_col) = cols.tracking_number.clone() else {
                continue;
            };
            let platform = Platform::detect(&table.headers);
            let addr = AddressColumns::resolve(&table.headers);
            let start = junk_row_skip(table, &cols, platform);

            for row_idx in start..table.rows.len() {
                let value = table
                    .cell(row_idx, &tracking_col)
                    .map(|c| c.to_text())
                    .unwrap_or_default();
                let value = value.trim();
                if is_leaked_junk(value) || value.to_lowercase() != needle {
                    continue;
                }

                let mut row = extract_row(table, row_idx, &cols, &addr);
                let code = codes.order_code(&row.parent_sku)?;
                row.has_order_code = code.is_some();
                row.order_code = format_order_code(
                    code.as_deref(),
                    &row.parent_sku,
                    &row.product_name,
                    &row.variation_name,
                    row.quantity,
                );
                rows.push(row);
            }
        }
    }

    let rows = merge_rows(rows, codes)?;

    let mut already_scanned = false;
    if let Some(first) = rows.first() {
        let courier = first.shipping_courier.clone();
        already_scanned = !ledger.mark_scanned(query, &courier)?;
    }

    let courier_stats = compute_stats(source, ledger)?;

    Ok(SearchOutcome {
        tracking_number: query.to_string(),
        rows,
        error: None,
        already_scanned,
        courier_stats,
        warnings,
        run_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Collapse split order lines: rows sharing a [`MergeKey`] become one row
/// with quantities summed, keeping first-seen order. The order code is
/// re-formatted afterwards so the label reflects the summed quantity, not
/// the first physical row's.
fn merge_rows<C: OrderCodeSource>(
    rows: Vec<OrderRow>,
    codes: &C,
) -> Result<Vec<OrderRow>, EngineError> {
    let mut merged: Vec<OrderRow> = Vec::with_capacity(rows.len());
    let mut index: HashMap<MergeKey, usize> = HashMap::new();

    for row in rows {
        match index.entry(row.merge_key()) {
            Entry::Occupied(slot) => merged[*slot.get()].quantity += row.quantity,
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(row);
            }
        }
    }

    for row in &mut merged {
        if row.has_order_code {
            let code = codes.order_code(&row.parent_sku)?;
            row.order_code = format_order_code(
                code.as_deref(),
                &row.parent_sku,
                &row.product_name,
                &row.variation_name,
                row.quantity,
            );
        }
    }

    Ok(merged)
}
