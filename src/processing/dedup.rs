//! Record de-duplication logic.
//!
//! Keeps the first record for each literal `ip_range` string, in input order.

use crate::models::GeoRecord;
use std::collections::HashMap;

/// A dropped duplicate whose metadata disagrees with the record that was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateConflict {
    pub kept: GeoRecord,
    pub dropped: GeoRecord,
}

/// Result of [`de_duplicate_records`].
#[derive(Debug, Default)]
pub struct DedupOutcome {
    /// First occurrence of each range string, in input order.
    pub records: Vec<GeoRecord>,
    pub duplicates_removed: usize,
    pub conflicts: Vec<DuplicateConflict>,
}

/// De-duplicate records by their exact `ip_range` text.
///
/// Ranges are not parsed here: `10.0.0.0/8` and `10.0.0.1/8` are distinct
/// keys even though they describe the same network.
///
/// # Arguments
/// * `records` - Records in input order
///
/// # Returns
/// The kept records plus duplicate bookkeeping
pub fn de_duplicate_records(records: Vec<GeoRecord>) -> DedupOutcome {
    // range text -> position in outcome.records
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut outcome = DedupOutcome::default();

    for record in records {
        match seen.get(&record.ip_range).copied() {
            Some(kept_index) => {
                outcome.duplicates_removed += 1;
                let kept = &outcome.records[kept_index];
                if !kept.same_metadata(&record) {
                    log::warn!(
                        "{} has duplicates with mismatched info: kept {:?}, dropped {:?}",
                        record.ip_range,
                        kept,
                        record
                    );
                    outcome.conflicts.push(DuplicateConflict {
                        kept: kept.clone(),
                        dropped: record,
                    });
                }
            }
            None => {
                seen.insert(record.ip_range.clone(), outcome.records.len());
                outcome.records.push(record);
            }
        }
    }

    log::info!(
        "De-duplicated to {} records ({} duplicates removed, {} with mismatched info)",
        outcome.records.len(),
        outcome.duplicates_removed,
        outcome.conflicts.len()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ranges: &[&str]) -> Vec<GeoRecord> {
        ranges.iter().map(|r| GeoRecord::new(r)).collect()
    }

    fn ranges(records: &[GeoRecord]) -> Vec<&str> {
        records.iter().map(|r| r.ip_range.as_str()).collect()
    }

    #[test]
    fn test_de_duplicate_keeps_first_in_order() {
        let input = records(&[
            "10.0.0.0/8",
            "192.168.0.0/24",
            "10.0.0.0/8",
            "172.16.0.0/12",
            "192.168.0.0/24",
        ]);
        let outcome = de_duplicate_records(input);
        assert_eq!(
            ranges(&outcome.records),
            vec!["10.0.0.0/8", "192.168.0.0/24", "172.16.0.0/12"]
        );
        assert_eq!(outcome.duplicates_removed, 2);
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn test_de_duplicate_idempotent() {
        let input = records(&["a", "b", "a", "c", "b", "d"]);
        let once = de_duplicate_records(input);
        let twice = de_duplicate_records(once.records.clone());
        assert_eq!(once.records, twice.records);
        assert_eq!(twice.duplicates_removed, 0);
    }

    #[test]
    fn test_de_duplicate_is_subsequence() {
        let input = records(&["x", "y", "x", "z", "y", "x"]);
        let outcome = de_duplicate_records(input.clone());
        let mut pos = 0;
        for kept in &outcome.records {
            let found = input[pos..]
                .iter()
                .position(|r| r == kept)
                .expect("output must be a subsequence of input");
            pos += found + 1;
        }
    }

    #[test]
    fn test_de_duplicate_literal_text() {
        // Same network, different text: both survive.
        let outcome = de_duplicate_records(records(&["10.0.0.0/8", "10.0.0.1/8"]));
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_de_duplicate_reports_conflicts() {
        let mut first = GeoRecord::new("10.0.0.0/8");
        first.country_code = "US".to_string();
        let mut same = first.clone();
        same.postal_code = String::new();
        let mut different = first.clone();
        different.country_code = "CA".to_string();

        let outcome = de_duplicate_records(vec![first.clone(), same, different.clone()]);
        assert_eq!(outcome.records, vec![first.clone()]);
        assert_eq!(outcome.duplicates_removed, 2);
        assert_eq!(
            outcome.conflicts,
            vec![DuplicateConflict {
                kept: first,
                dropped: different
            }]
        );
    }

    #[test]
    fn test_de_duplicate_empty() {
        let outcome = de_duplicate_records(Vec::new());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.duplicates_removed, 0);
    }
}
