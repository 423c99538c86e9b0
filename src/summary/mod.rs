//! Diagnosis Summary Pipeline
//!
//! The core of the service: pure transforms from raw rows to the windowed,
//! ranked summary a dashboard displays.
//!
//! - **Aggregate**: rows → label → count tally
//! - **Rank**: tally + filter state → ordered (label, count) entries
//! - **Window**: growable prefix cursor over the ranked entries
//! - **Session**: explicit state object tying the three together
//! - **Period**: dropdown options for the (currently inert) period filter
//!
//! # Pipeline
//!
//! ```text
//! rows → aggregate → rank(filter) → window.visible → consumer
//! ```
//!
//! Every stage is synchronous and pure; any state change re-runs the whole
//! derivation. Degraded inputs (no rows, unmatched search) yield empty
//! collections, never errors.
//!
//! # Example
//!
//! ```rust
//! use diagsum::summary::{aggregate, rank, FilterState, VisibleWindow};
//! use diagsum::sheet::Row;
//!
//! let rows: Vec<Row> = serde_json::from_str(
//!     r#"[{"การวินิจฉัย": "Flu"}, {"การวินิจฉัย": " Flu "}, {"การวินิจฉัย": ""}]"#,
//! ).unwrap();
//!
//! let tally = aggregate(&rows, "การวินิจฉัย");
//! let ranked = rank(&tally, &FilterState::default());
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].count, 2);
//!
//! let window = VisibleWindow::new();
//! assert_eq!(window.visible(&ranked).len(), 1);
//! ```

mod aggregate;
mod period;
mod rank;
mod session;
mod window;

pub use aggregate::{aggregate, Tally};
pub use period::{period_options, BUDDHIST_YEAR_OFFSET};
pub use rank::{rank, FilterState, RankedEntry};
pub use session::DashboardSession;
pub use window::{VisibleWindow, PAGE_SIZE};
