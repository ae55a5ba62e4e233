//! Platform detection and export-specific junk rows.

use std::fmt;

use serde::Serialize;

use crate::columns::ResolvedColumns;
use crate::table::SheetTable;

/// Marketplace that produced an export sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    Shopee,
    Lazada,
    TikTok,
    Unknown,
}

impl Platform {
    /// Identify the platform from header names alone.
    ///
    /// Header sets overlap ("Order ID" appears everywhere), so each check
    /// keys on a header the other platforms never emit, probed in a fixed
    /// priority order.
    pub fn detect(headers: &[String]) -> Platform {
        let folded: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let has = |name: &str| folded.iter().any(|h| h == name);

        if has("tracking id") || has("shipping provider name") {
            return Platform::TikTok;
        }
        if has("order sn") || has("username (buyer)") || has("shipping option") {
            return Platform::Shopee;
        }
        if has("tracking code")
            || has("trackingcode")
            || has("order number")
            || has("ordernumber")
            || has("shipping address 2")
            || has("shippingaddress2")
        {
            return Platform::Lazada;
        }
        Platform::Unknown
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shopee => write!(f, "Shopee"),
            Self::Lazada => write!(f, "Lazada"),
            Self::TikTok => write!(f, "TikTok"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Rows to skip at the top of a sheet.
///
/// TikTok order exports insert a column-description row directly under the
/// headers. Probe the first row's Order ID, Tracking, and Shipping Provider
/// values once per sheet; when any of them reads like a description instead
/// of data, skip that one row. Only ever removes the first row, and only on
/// TikTok sheets.
pub fn junk_row_skip(table: &SheetTable, cols: &ResolvedColumns, platform: Platform) -> usize {
    if platform != Platform::TikTok || table.rows.is_empty() {
        return 0;
    }

    let probe = |col: &Option<String>| -> bool {
        let Some(header) = col else { return false };
        match table.cell(0, header) {
            Some(cell) => is_description_text(&cell.to_text()),
            None => false,
        }
    };

    if probe(&cols.order_id) || probe(&cols.tracking_number) || probe(&cols.shipping_courier) {
        1
    } else {
        0
    }
}

fn is_description_text(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    if v.is_empty() {
        return false;
    }
    v.contains("platform")
        || v.contains("unique")
        || v.ends_with('.')
        || v.contains("order's")
        || v.contains("tracking number")
        || v.contains("shipping provider")
}
