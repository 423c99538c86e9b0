//! Query Pipeline
//!
//! Derives the ranked, filterable summary from a tally plus the current
//! filter state:
//!
//! 1. Drop the sentinel label
//! 2. Keep labels containing the search text (case-insensitive substring;
//!    empty search keeps all)
//! 3. Sort by count descending, then label ascending
//!
//! The selected period is carried in [`FilterState`] but is not applied as
//! a predicate; it has no effect on the ranked output.

use serde::{Deserialize, Serialize};

use crate::sheet::UNSPECIFIED_LABEL;
use crate::summary::aggregate::Tally;

/// Filter state supplied by the consumer on every derivation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Search text, matched case-insensitively against labels
    pub search: String,
    /// Selected period token, carried but not used for filtering
    pub period: Option<String>,
}

impl FilterState {
    /// Filter state with only a search text
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            period: None,
        }
    }
}

/// A (label, count) pair in the ranked output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Diagnosis label
    pub label: String,
    /// Number of rows with this label
    pub count: u64,
}

/// Rank tally entries under the given filter state.
///
/// The output never contains the sentinel label or duplicate labels, and is
/// ordered by count descending with ties broken by label ascending (byte
/// order). An empty tally or an unmatched search yields an empty vector.
pub fn rank(tally: &Tally, filter: &FilterState) -> Vec<RankedEntry> {
    let needle = filter.search.to_lowercase();

    let mut entries: Vec<RankedEntry> = tally
        .iter()
        .filter(|(label, _)| *label != UNSPECIFIED_LABEL)
        .filter(|(label, _)| needle.is_empty() || label.to_lowercase().contains(&needle))
        .map(|(label, count)| RankedEntry {
            label: label.to_string(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)]) -> Tally {
        entries
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_sentinel_never_ranked() {
        let tally = tally(&[("Flu", 2), ("-", 2)]);

        let ranked = rank(&tally, &FilterState::default());

        assert_eq!(
            ranked,
            vec![RankedEntry {
                label: "Flu".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_empty_search_keeps_all_non_sentinel() {
        let tally = tally(&[("A", 3), ("B", 1), ("-", 5)]);

        let ranked = rank(&tally, &FilterState::default());

        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tally = tally(&[("Influenza", 4), ("Common cold", 2), ("Fracture", 1)]);

        let ranked = rank(&tally, &FilterState::search("FLU"));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].label, "Influenza");

        let ranked = rank(&tally, &FilterState::search("c"));
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Common cold", "Fracture"]);
    }

    #[test]
    fn test_unmatched_search_yields_empty() {
        let tally = tally(&[("A", 3)]);
        assert!(rank(&tally, &FilterState::search("zzz")).is_empty());
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let tally = tally(&[("Low", 1), ("High", 9), ("Mid", 4)]);

        let ranked = rank(&tally, &FilterState::default());

        for pair in ranked.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_equal_counts_break_ties_by_label() {
        let tally = tally(&[("B", 5), ("A", 5), ("C", 1)]);

        let ranked = rank(&tally, &FilterState::default());

        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_idempotent() {
        let tally = tally(&[("A", 5), ("B", 5), ("C", 1), ("D", 3)]);
        let filter = FilterState::search("");

        assert_eq!(rank(&tally, &filter), rank(&tally, &filter));
    }

    #[test]
    fn test_period_has_no_effect_on_output() {
        let tally = tally(&[("A", 5), ("B", 2)]);

        let without = rank(&tally, &FilterState::default());
        let with = rank(
            &tally,
            &FilterState {
                search: String::new(),
                period: Some("มกราคม 2569".to_string()),
            },
        );

        assert_eq!(without, with);
    }

    #[test]
    fn test_empty_tally_yields_empty() {
        assert!(rank(&Tally::new(), &FilterState::default()).is_empty());
    }
}
