//! Aggregator
//!
//! Folds the raw row sequence into a tally of occurrence counts per
//! diagnosis label. Pure transform: a new [`Tally`] per call, no errors.
//! Rows with a missing or blank diagnosis cell count under the sentinel
//! label so that every row is counted exactly once.

use std::collections::HashMap;

use crate::sheet::Row;

/// Occurrence counts keyed by diagnosis label.
///
/// Invariant: the sum of all counts (sentinel included) equals the number
/// of rows the tally was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(HashMap<String, u64>);

impl Tally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Count for a label, 0 if unseen
    pub fn count(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels (sentinel included)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total rows counted, across all labels
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate over (label, count) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build a tally from rows, grouping by the diagnosis column.
///
/// Labels are trimmed; missing/blank cells normalize to the sentinel label
/// rather than being treated as a fault. Result is invariant to row order.
pub fn aggregate(rows: &[Row], diagnosis_key: &str) -> Tally {
    let mut counts: HashMap<String, u64> = HashMap::new();

    for row in rows {
        let label = row.label(diagnosis_key);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }

    Tally(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::UNSPECIFIED_LABEL;
    use serde_json::json;

    const KEY: &str = "การวินิจฉัย";

    fn rows(value: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_counts_trimmed_labels_together() {
        let rows = rows(json!([
            {"การวินิจฉัย": "Flu"},
            {"การวินิจฉัย": " Flu "},
            {"การวินิจฉัย": ""},
            {}
        ]));

        let tally = aggregate(&rows, KEY);

        assert_eq!(tally.count("Flu"), 2);
        assert_eq!(tally.count(UNSPECIFIED_LABEL), 2);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_every_row_counted_exactly_once() {
        let rows = rows(json!([
            {"การวินิจฉัย": "A"},
            {"การวินิจฉัย": "B"},
            {"การวินิจฉัย": "A"},
            {"การวินิจฉัย": "  "},
            {"other": "x"},
            {"การวินิจฉัย": "C"}
        ]));

        let tally = aggregate(&rows, KEY);

        assert_eq!(tally.total(), rows.len() as u64);
    }

    #[test]
    fn test_empty_rows_yield_empty_tally() {
        let tally = aggregate(&[], KEY);
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_result_invariant_to_row_order() {
        let forward = rows(json!([
            {"การวินิจฉัย": "A"},
            {"การวินิจฉัย": "B"},
            {"การวินิจฉัย": "A"}
        ]));
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(aggregate(&forward, KEY), aggregate(&backward, KEY));
    }
}
