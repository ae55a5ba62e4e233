//! Compare-list classification: split a pasted manifest into tracking
//! numbers and order ids, then partition against the scan ledger.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::EngineError;
use crate::model::CompareReport;
use crate::source::ScanLedger;

static TRACKING: OnceLock<Regex> = OnceLock::new();
static ORDER_ID: OnceLock<Regex> = OnceLock::new();

fn tracking_re() -> &'static Regex {
    TRACKING.get_or_init(|| Regex::new(r"(?i)^PH[A-Z0-9]+$").unwrap())
}

fn order_id_re() -> &'static Regex {
    // Order ids open with a six-digit date prefix.
    ORDER_ID.get_or_init(|| Regex::new(r"(?i)^[0-9]{6}[A-Z0-9]+$").unwrap())
}

/// Classify newline-separated input. Lines matching neither pattern are
/// dropped silently; tracking membership in the ledger is case-insensitive.
pub fn compare_list<L: ScanLedger>(ledger: &L, raw: &str) -> Result<CompareReport, EngineError> {
    let mut tracking_numbers: Vec<String> = Vec::new();
    let mut order_ids: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if tracking_re().is_match(line) {
            tracking_numbers.push(line.to_string());
        } else if order_id_re().is_match(line) {
            order_ids.push(line.to_string());
        }
    }

    let scanned_set: HashSet<String> = ledger
        .scanned_tracking_numbers()?
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect();

    let mut scanned = Vec::new();
    let mut remaining = Vec::new();
    for tracking in tracking_numbers {
        if scanned_set.contains(&tracking.to_lowercase()) {
            scanned.push(tracking);
        } else {
            remaining.push(tracking);
        }
    }

    Ok(CompareReport {
        total: scanned.len() + remaining.len(),
        scanned_count: scanned.len(),
        remaining_count: remaining.len(),
        remaining,
        scanned,
        order_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct ListLedger(Vec<String>);

    impl ScanLedger for ListLedger {
        fn is_scanned(&self, tracking_number: &str) -> Result<bool, EngineError> {
            Ok(self.0.iter().any(|t| t == tracking_number))
        }
        fn mark_scanned(&self, _t: &str, _c: &str) -> Result<bool, EngineError> {
            Ok(true)
        }
        fn scanned_tracking_numbers(&self) -> Result<Vec<String>, EngineError> {
            Ok(self.0.clone())
        }
        fn count_by_courier(&self) -> Result<HashMap<String, usize>, EngineError> {
            Ok(HashMap::new())
        }
    }

    #[test]
    fn classifies_and_drops_noise() {
        let ledger = ListLedger(Vec::new());
        let report = compare_list(&ledger, "PH12345678\n250101AB99\nrandomtext\n").unwrap();
        assert_eq!(report.remaining, vec!["PH12345678"]);
        assert_eq!(report.order_ids, vec!["250101AB99"]);
        assert_eq!(report.total, 1);
        assert_eq!(report.scanned_count, 0);
    }

    #[test]
    fn partition_is_case_insensitive() {
        let ledger = ListLedger(vec!["PH111AAA".into()]);
        let report = compare_list(&ledger, "ph111aaa\nPH222BBB").unwrap();
        assert_eq!(report.scanned, vec!["ph111aaa"]);
        assert_eq!(report.remaining, vec!["PH222BBB"]);
        assert_eq!(report.scanned_count, 1);
        assert_eq!(report.remaining_count, 1);
    }

    #[test]
    fn whitespace_lines_are_ignored() {
        let ledger = ListLedger(Vec::new());
        let report = compare_list(&ledger, "\n  \n  PH1X  \n").unwrap();
        assert_eq!(report.remaining, vec!["PH1X"]);
    }

    #[test]
    fn order_id_needs_six_leading_digits() {
        let ledger = ListLedger(Vec::new());
        let report = compare_list(&ledger, "25010AB99\n250101XYZ").unwrap();
        assert!(report.remaining.is_empty());
        assert_eq!(report.order_ids, vec!["250101XYZ"]);
    }
}
