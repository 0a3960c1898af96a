//! Longest-streak detection over calendar dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{ChatwrapError, Result};

/// The longest run of consecutive calendar dates with at least one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Streak {
    /// Number of consecutive days; a single active date has length 1.
    pub length: u64,
    /// First day of the run (inclusive).
    pub start: NaiveDate,
    /// Last day of the run (inclusive).
    pub end: NaiveDate,
}

impl Streak {
    /// The start date as an ISO calendar string (`YYYY-MM-DD`).
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// The end date as an ISO calendar string (`YYYY-MM-DD`).
    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Finds the longest run of consecutive distinct dates.
///
/// When several runs share the maximum length, the earliest one wins.
///
/// # Errors
///
/// Returns the no-dates input error when `dates` is empty.
pub fn longest_streak(dates: impl IntoIterator<Item = NaiveDate>) -> Result<Streak> {
    let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut iter = dates.iter().copied();
    let Some(first) = iter.next() else {
        return Err(ChatwrapError::no_dates());
    };

    let mut max_length = 1u64;
    let mut max_start = first;
    let mut max_end = first;
    let mut current_length = 1u64;
    let mut run_start = first;
    let mut prev = first;

    for date in iter {
        if (date - prev).num_days() == 1 {
            current_length += 1;
            // Strict comparison keeps the earliest maximal run.
            if current_length > max_length {
                max_length = current_length;
                max_start = run_start;
                max_end = date;
            }
        } else {
            current_length = 1;
            run_start = date;
        }
        prev = date;
    }

    Ok(Streak {
        length: max_length,
        start: max_start,
        end: max_end,
    })
}
