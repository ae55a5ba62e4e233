//! Row extraction: raw sheet row → normalized [`OrderRow`].

use crate::columns::{resolve_column, ResolvedColumns};
use crate::model::OrderRow;
use crate::table::SheetTable;

/// Address fragment columns resolved once per sheet, used when the primary
/// delivery-address column is absent or empty.
#[derive(Debug, Clone, Default)]
pub struct AddressColumns {
    /// Lazada-style numbered fragments, ascending (`shippingAddress2`..`5`).
    lazada: Vec<String>,
    /// TikTok-style fragments in display order: detail address, barangay,
    /// municipality, province, region.
    tiktok: Vec<String>,
}

impl AddressColumns {
    pub fn resolve(headers: &[String]) -> Self {
        let lazada_keywords: [&[&str]; 4] = [
            &["shipping address 2", "shippingaddress2"],
            &["shipping address 3", "shippingaddress3"],
            &["shipping address 4", "shippingaddress4"],
            &["shipping address 5", "shippingaddress5"],
        ];
        let tiktok_keywords: [&[&str]; 5] = [
            &["detail address"],
            &["barangay", "villages"],
            &["municipality", "districts", "city"],
            &["province"],
            &["region"],
        ];

        let resolve_all = |sets: &[&[&str]]| -> Vec<String> {
            sets.iter()
                .filter_map(|keywords| resolve_column(headers, keywords).map(str::to_string))
                .collect()
        };

        AddressColumns {
            lazada: resolve_all(&lazada_keywords),
            tiktok: resolve_all(&tiktok_keywords),
        }
    }

    /// Whether a header is one of the fragment columns. The generic
    /// "address" synonym can land the primary resolver on a fragment
    /// (`shippingAddress2`, `Detail Address`); such a hit means the sheet
    /// has no real primary column and the composition chain applies.
    fn is_fragment(&self, header: &str) -> bool {
        self.lazada.iter().any(|h| h == header) || self.tiktok.iter().any(|h| h == header)
    }
}

/// A tracking cell that leaked out of a description row. These rows are
/// excluded wherever they appear, not only via the TikTok first-row filter.
pub fn is_leaked_junk(tracking_value: &str) -> bool {
    let v = tracking_value.to_lowercase();
    v.contains("order's") || v.contains("tracking number.")
}

/// Convert one raw row into an [`OrderRow`]. The caller has already matched
/// the row's tracking value against the query; no filtering happens here.
pub fn extract_row(
    table: &SheetTable,
    row_idx: usize,
    cols: &ResolvedColumns,
    addr: &AddressColumns,
) -> OrderRow {
    OrderRow {
        source: table.source.clone(),
        order_id: text_or(table, row_idx, &cols.order_id, "N/A"),
        tracking_number: text_or(table, row_idx, &cols.tracking_number, "N/A"),
        product_name: text_or(table, row_idx, &cols.product_name, "N/A"),
        parent_sku: text_or(table, row_idx, &cols.parent_sku, "N/A"),
        variation_name: text_or(table, row_idx, &cols.variation_name, ""),
        quantity: parse_quantity(field_text(table, row_idx, &cols.quantity)),
        deal_price: text_or(table, row_idx, &cols.deal_price, "N/A"),
        username: text_or(table, row_idx, &cols.username, "N/A"),
        receiver_name: text_or(table, row_idx, &cols.receiver_name, "N/A"),
        phone_number: text_or(table, row_idx, &cols.phone_number, "N/A"),
        delivery_address: compose_address(table, row_idx, cols, addr),
        sku_weight: text_or(table, row_idx, &cols.sku_weight, "N/A"),
        shipping_courier: text_or(table, row_idx, &cols.shipping_courier, "Unknown"),
        order_code: None,
        has_order_code: false,
    }
}

/// Trimmed cell text; `None` when the cell is absent or blank.
fn cell_text(table: &SheetTable, row_idx: usize, header: &str) -> Option<String> {
    let cell = table.cell(row_idx, header)?;
    let text = cell.to_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Same, for a column the resolver may not have found.
fn field_text(table: &SheetTable, row_idx: usize, col: &Option<String>) -> Option<String> {
    col.as_deref()
        .and_then(|header| cell_text(table, row_idx, header))
}

fn text_or(table: &SheetTable, row_idx: usize, col: &Option<String>, default: &str) -> String {
    field_text(table, row_idx, col).unwrap_or_else(|| default.to_string())
}

/// Positive integer, defaulting to 1 on absent or non-numeric input.
fn parse_quantity(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| *n >= 1.0)
        .map(|n| n as u32)
        .unwrap_or(1)
}

/// Delivery address with the platform fallback chain: the primary column,
/// else Lazada numbered fragments, else TikTok region fragments, else "N/A".
fn compose_address(
    table: &SheetTable,
    row_idx: usize,
    cols: &ResolvedColumns,
    addr: &AddressColumns,
) -> String {
    let has_primary = cols
        .delivery_address
        .as_deref()
        .is_some_and(|header| !addr.is_fragment(header));
    if has_primary {
        if let Some(primary) = field_text(table, row_idx, &cols.delivery_address) {
            return primary;
        }
    }

    for fragments in [&addr.lazada, &addr.tiktok] {
        let parts: Vec<String> = fragments
            .iter()
            .filter_map(|header| cell_text(table, row_idx, header))
            .collect();
        if !parts.is_empty() {
            return parts.join(", ");
        }
    }

    "N/A".to_string()
}
