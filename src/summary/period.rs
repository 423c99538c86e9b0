//! Period Options
//!
//! Builds the period dropdown choices: January of the current and previous
//! years in the Thai Buddhist calendar (Gregorian year + 543), newest
//! first. The selection is carried as filter state only; see
//! [`FilterState`](crate::summary::FilterState).

use chrono::{Datelike, NaiveDate};

/// Offset between the Gregorian and Buddhist calendar years
pub const BUDDHIST_YEAR_OFFSET: i32 = 543;

const JANUARY_TH: &str = "มกราคม";

/// Period tokens for the given date: this year and last, Buddhist calendar
pub fn period_options(today: NaiveDate) -> Vec<String> {
    let current_year = today.year() + BUDDHIST_YEAR_OFFSET;
    [current_year, current_year - 1]
        .iter()
        .map(|year| format!("{JANUARY_TH} {year}"))
        .collect()
}
