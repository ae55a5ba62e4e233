use serde::Serialize;

// ---------------------------------------------------------------------------
// Match results
// ---------------------------------------------------------------------------

/// One normalized order line matched by a search.
///
/// Reconstructed from the source sheets on every search, never persisted.
/// Before the merge pass there is one per physical spreadsheet row; after
/// it, one per [`MergeKey`] with `quantity` summed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    /// Originating file name.
    pub source: String,
    pub order_id: String,
    pub tracking_number: String,
    pub product_name: String,
    pub parent_sku: String,
    pub variation_name: String,
    pub quantity: u32,
    pub deal_price: String,
    pub username: String,
    pub receiver_name: String,
    pub phone_number: String,
    pub delivery_address: String,
    pub sku_weight: String,
    pub shipping_courier: String,
    /// Formatted display string, `None` when no code is mapped for the SKU.
    pub order_code: Option<String>,
    pub has_order_code: bool,
}

/// Fields identifying logically-equivalent split rows. Platforms that break
/// one order line into several physical rows produce identical keys; the
/// merge pass sums their quantities. All comparisons are exact
/// (case-sensitive) except the tracking number, which is matched
/// case-insensitively upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub source: String,
    pub tracking_number: String,
    pub order_id: String,
    pub parent_sku: String,
    pub variation_name: String,
    pub product_name: String,
}

impl OrderRow {
    pub fn merge_key(&self) -> MergeKey {
        MergeKey {
            source: self.source.clone(),
            tracking_number: self.tracking_number.clone(),
            order_id: self.order_id.clone(),
            parent_sku: self.parent_sku.clone(),
            variation_name: self.variation_name.clone(),
            product_name: self.product_name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates + outcome payloads
// ---------------------------------------------------------------------------

/// Per-courier progress: distinct tracking numbers seen in the sheets vs
/// tracking numbers already scanned.
#[derive(Debug, Clone, Serialize)]
pub struct CourierStat {
    /// Display label, platform-suffixed when one was detected
    /// (`"J&T Express (Shopee)"`). Scanned counts always join on the
    /// unsuffixed courier string.
    pub courier: String,
    pub total: usize,
    pub scanned: usize,
}

/// Full result of one search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub tracking_number: String,
    pub rows: Vec<OrderRow>,
    /// Structured error string ("no data sources"), never a fault.
    pub error: Option<String>,
    /// Whether this tracking number had been scanned before this search.
    pub already_scanned: bool,
    pub courier_stats: Vec<CourierStat>,
    /// Per-file read failures that were skipped, one message each.
    pub warnings: Vec<String>,
    pub run_at: String,
}

impl SearchOutcome {
    pub(crate) fn no_data(tracking_number: &str) -> SearchOutcome {
        SearchOutcome {
            tracking_number: tracking_number.to_string(),
            rows: Vec::new(),
            error: Some("no spreadsheet files loaded".to_string()),
            already_scanned: false,
            courier_stats: Vec::new(),
            warnings: Vec::new(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Result of classifying a pasted manifest against the scan ledger.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub total: usize,
    pub scanned_count: usize,
    pub remaining_count: usize,
    pub remaining: Vec<String>,
    pub scanned: Vec<String>,
    pub order_ids: Vec<String>,
}
