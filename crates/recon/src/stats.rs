//! Courier statistics: distinct tracking totals vs scanned counts.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::columns::ResolvedColumns;
use crate::error::EngineError;
use crate::extract::is_leaked_junk;
use crate::model::CourierStat;
use crate::platform::{junk_row_skip, Platform};
use crate::source::{ScanLedger, SheetSource};

/// Recompute per-courier statistics from scratch.
///
/// Walks every loaded sheet (same pipeline as the search, minus the
/// tracking filter) and counts distinct (courier, tracking) pairs —
/// duplicates across sheets and files collapse. All accumulators are local
/// to the call; nothing is cached between invocations. Unreadable files
/// are skipped. Couriers are grouped by exact trimmed string; spelling
/// variants count separately.
pub fn compute_stats<S, L>(source: &S, ledger: &L) -> Result<Vec<CourierStat>, EngineError>
where
    S: SheetSource,
    L: ScanLedger,
{
    let scanned = ledger.count_by_courier()?;

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut totals: BTreeMap<String, usize> = BTreeMap::new();
    let mut platforms: HashMap<String, Platform> = HashMap::new();

    for file in source.list_files()? {
        let tables = match source.load_sheets(&file) {
            Ok(tables) => tables,
            Err(_) => continue,
        };

        for table in &tables {
            let cols = ResolvedColumns::resolve(&table.headers);
            let (Some(courier_col), Some(tracking_col)) =
                (cols.shipping_courier.clone(), cols.tracking_number.clone())
            else {
                continue;
            };
            let platform = Platform::detect(&table.headers);
            let start = junk_row_skip(table, &cols, platform);

            for row_idx in start..table.rows.len() {
                let text_at = |header: &str| {
                    table
                        .cell(row_idx, header)
                        .map(|c| c.to_text().trim().to_string())
                        .unwrap_or_default()
                };
                let courier = text_at(&courier_col);
                let tracking = text_at(&tracking_col);
                if courier.is_empty() || tracking.is_empty() || is_leaked_junk(&tracking) {
                    continue;
                }

                if seen.insert((courier.clone(), tracking)) {
                    *totals.entry(courier.clone()).or_insert(0) += 1;
                    if platform != Platform::Unknown {
                        platforms.entry(courier).or_insert(platform);
                    }
                }
            }
        }
    }

    let mut stats: Vec<CourierStat> = totals
        .into_iter()
        .map(|(courier, total)| {
            let scanned_count = scanned.get(&courier).copied().unwrap_or(0);
            let label = match platforms.get(&courier) {
                Some(platform) => format!("{courier} ({platform})"),
                None => courier,
            };
            CourierStat {
                courier: label,
                total,
                scanned: scanned_count,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::table::{Cell, SheetTable};
    use std::sync::Mutex;

    fn sheet(source: &str, headers: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable {
            source: source.into(),
            sheet: "Sheet1".into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| Cell::Text(v.to_string())).collect())
                .collect(),
        }
    }

    #[derive(Default)]
    struct FixedLedger {
        counts: Mutex<HashMap<String, usize>>,
    }

    impl FixedLedger {
        fn with(courier: &str, count: usize) -> Self {
            let ledger = FixedLedger::default();
            ledger.counts.lock().unwrap().insert(courier.into(), count);
            ledger
        }
    }

    impl ScanLedger for FixedLedger {
        fn is_scanned(&self, _tracking_number: &str) -> Result<bool, EngineError> {
            Ok(false)
        }
        fn mark_scanned(&self, _t: &str, _c: &str) -> Result<bool, EngineError> {
            Ok(true)
        }
        fn scanned_tracking_numbers(&self) -> Result<Vec<String>, EngineError> {
            Ok(Vec::new())
        }
        fn count_by_courier(&self) -> Result<HashMap<String, usize>, EngineError> {
            Ok(self.counts.lock().unwrap().clone())
        }
    }

    const HEADERS: &[&str] = &["Tracking Number", "Shipping Option"];

    #[test]
    fn duplicates_across_sheets_collapse() {
        let source = StaticSource::new(vec![
            sheet("a.xlsx", HEADERS, &[&["PH1", "J&T"], &["PH2", "J&T"]]),
            sheet("b.xlsx", HEADERS, &[&["PH1", "J&T"], &["PH3", "Flash"]]),
        ]);
        let ledger = FixedLedger::default();
        let stats = compute_stats(&source, &ledger).unwrap();

        assert_eq!(stats.len(), 2);
        assert!(stats[0].courier.starts_with("J&T"));
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[1].total, 1);
    }

    #[test]
    fn scanned_counts_join_on_the_unsuffixed_name() {
        let source = StaticSource::new(vec![sheet(
            "a.xlsx",
            &["Tracking Number*", "Shipping Option", "Order SN"],
            &[&["PH1", "Flash Express", "1"]],
        )]);
        let ledger = FixedLedger::with("Flash Express", 1);
        let stats = compute_stats(&source, &ledger).unwrap();

        assert_eq!(stats.len(), 1);
        // display label carries the detected platform, join key does not
        assert_eq!(stats[0].courier, "Flash Express (Shopee)");
        assert_eq!(stats[0].scanned, 1);
    }

    #[test]
    fn sorted_by_total_descending() {
        let source = StaticSource::new(vec![sheet(
            "a.xlsx",
            HEADERS,
            &[
                &["PH1", "Flash"],
                &["PH2", "J&T"],
                &["PH3", "J&T"],
                &["PH4", "J&T"],
                &["PH5", "Flash"],
            ],
        )]);
        let ledger = FixedLedger::default();
        let stats = compute_stats(&source, &ledger).unwrap();
        assert_eq!(stats[0].total, 3);
        assert_eq!(stats[1].total, 2);
    }

    #[test]
    fn courier_spellings_count_separately() {
        let source = StaticSource::new(vec![sheet(
            "a.xlsx",
            HEADERS,
            &[&["PH1", "J&T Express"], &["PH2", "j&t express"]],
        )]);
        let ledger = FixedLedger::default();
        let stats = compute_stats(&source, &ledger).unwrap();
        assert_eq!(stats.len(), 2);
    }
}
