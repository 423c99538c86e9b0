//! Dashboard Session
//!
//! Explicit state object for one viewing session: the fetched rows, the
//! current filter state, and the visible window. State is mutated only
//! through named operations; every read re-derives the ranked output in
//! full from the current state, so the ordering guarantees of the pipeline
//! hold without any hidden dependency tracking.
//!
//! Lifecycle: created empty, loaded once from the row source, filter and
//! window mutated by the consumer, dropped at session end. Any observable
//! filter change resets the window to its initial cursor.

use crate::sheet::Row;
use crate::summary::aggregate::{aggregate, Tally};
use crate::summary::rank::{rank, FilterState, RankedEntry};
use crate::summary::window::VisibleWindow;

/// One viewing session over the diagnosis summary
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    diagnosis_key: String,
    rows: Vec<Row>,
    tally: Tally,
    filter: FilterState,
    window: VisibleWindow,
}

impl DashboardSession {
    /// Create an empty session grouping by the given diagnosis column
    pub fn new(diagnosis_key: impl Into<String>) -> Self {
        Self {
            diagnosis_key: diagnosis_key.into(),
            ..Default::default()
        }
    }

    /// Replace the row set and re-derive the tally.
    ///
    /// Resets the window: fresh data starts a fresh derivation.
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        self.tally = aggregate(&rows, &self.diagnosis_key);
        self.rows = rows;
        self.window.reset();
    }

    /// Set the search text. A changed value resets the window; setting the
    /// identical value is a no-op.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.filter.search != search {
            self.filter.search = search;
            self.window.reset();
        }
    }

    /// Set or clear the selected period. Carried as filter state (and so
    /// resets the window on change) even though ranking does not use it.
    pub fn set_period(&mut self, period: Option<String>) {
        if self.filter.period != period {
            self.filter.period = period;
            self.window.reset();
        }
    }

    /// Grow the visible window by one page
    pub fn advance_window(&mut self) {
        self.window.advance();
    }

    /// Reset the visible window to its initial cursor
    pub fn reset_window(&mut self) {
        self.window.reset();
    }

    /// Current filter state
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current window cursor
    pub fn window_cursor(&self) -> usize {
        self.window.cursor()
    }

    /// Number of rows loaded
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Aggregate tally over the loaded rows
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Full ranked output under the current filter state
    pub fn ranked(&self) -> Vec<RankedEntry> {
        rank(&self.tally, &self.filter)
    }

    /// The visible prefix of the ranked output
    pub fn visible(&self) -> Vec<RankedEntry> {
        let ranked = self.ranked();
        self.window.visible(&ranked).to_vec()
    }

    /// Whether more entries remain beyond the visible window
    pub fn has_more(&self) -> bool {
        self.window.has_more(&self.ranked())
    }
}
