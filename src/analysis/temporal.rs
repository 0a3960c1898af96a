//! Temporal activity aggregation.
//!
//! Two independent views over the same table: a date × sender matrix of
//! 7-day smoothed message counts, and an hour × sender matrix of totals.
//! Both are built as explicit grouped maps and reshaped with zero-fill and a
//! margin column.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::message::Message;

/// Width of the trailing moving-average window, in observations.
pub const ROLLING_WINDOW: usize = 7;

/// Date × sender matrix of 7-day trailing mean message counts.
///
/// Cells are `None` while a sender's series hasn't filled its first window
/// (the first six observations) — expected warm-up, not an error. A (date,
/// sender) combination the sender never posted on is `Some(0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyActivity {
    /// Column order: senders sorted by name.
    pub senders: Vec<String>,
    /// Row order: dates ascending.
    pub dates: Vec<NaiveDate>,
    /// `rows[i][j]`: smoothed count for `dates[i]` × `senders[j]`.
    pub rows: Vec<Vec<Option<f64>>>,
    /// Margin column: per-date sum of the defined cells.
    pub totals: Vec<f64>,
}

/// Hour × sender matrix of message totals.
///
/// Always exactly 24 rows (hours 0–23), with absent hours zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyActivity {
    /// Column order: senders sorted by name.
    pub senders: Vec<String>,
    /// `rows[h][j]`: messages from `senders[j]` during hour `h`.
    pub rows: Vec<Vec<u64>>,
    /// Margin column: per-hour total across senders.
    pub totals: Vec<u64>,
}

/// Builds the daily rolling-activity matrix.
///
/// Messages are grouped by (sender, date); each sender's per-date counts are
/// smoothed with a trailing [`ROLLING_WINDOW`]-observation mean over its own
/// series, then reshaped into the full date × sender matrix.
pub fn daily_activity(messages: &[Message]) -> DailyActivity {
    let mut counts: BTreeMap<&str, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    for msg in messages {
        *counts
            .entry(&msg.sender)
            .or_default()
            .entry(msg.date())
            .or_insert(0) += 1;
    }

    let senders: Vec<String> = counts.keys().map(|s| (*s).to_string()).collect();
    let dates: Vec<NaiveDate> = counts
        .values()
        .flat_map(|by_date| by_date.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Per sender: date → trailing mean over its own observations.
    let mut smoothed: BTreeMap<&str, BTreeMap<NaiveDate, Option<f64>>> = BTreeMap::new();
    for (sender, by_date) in &counts {
        let series: Vec<(NaiveDate, u64)> = by_date.iter().map(|(d, c)| (*d, *c)).collect();
        let entry = smoothed.entry(*sender).or_default();
        for (i, (date, _)) in series.iter().enumerate() {
            let value = if i + 1 >= ROLLING_WINDOW {
                let window = &series[i + 1 - ROLLING_WINDOW..=i];
                let sum: u64 = window.iter().map(|(_, c)| c).sum();
                Some(sum as f64 / ROLLING_WINDOW as f64)
            } else {
                None
            };
            entry.insert(*date, value);
        }
    }

    let mut rows: Vec<Vec<Option<f64>>> = Vec::with_capacity(dates.len());
    let mut totals: Vec<f64> = Vec::with_capacity(dates.len());
    for date in &dates {
        let row: Vec<Option<f64>> = senders
            .iter()
            .map(|sender| match smoothed.get(sender.as_str()).and_then(|m| m.get(date)) {
                Some(cell) => *cell,            // observed: smoothed value or warm-up None
                None => Some(0.0),              // combination never occurred
            })
            .collect();
        totals.push(row.iter().flatten().sum());
        rows.push(row);
    }

    DailyActivity {
        senders,
        dates,
        rows,
        totals,
    }
}

/// Builds the hour × sender totals matrix.
pub fn hourly_activity(messages: &[Message]) -> HourlyActivity {
    let mut counts: BTreeMap<&str, [u64; 24]> = BTreeMap::new();
    for msg in messages {
        counts.entry(&msg.sender).or_insert([0; 24])[msg.hour() as usize] += 1;
    }

    let senders: Vec<String> = counts.keys().map(|s| (*s).to_string()).collect();
    let mut rows: Vec<Vec<u64>> = Vec::with_capacity(24);
    let mut totals: Vec<u64> = Vec::with_capacity(24);
    for hour in 0..24 {
        let row: Vec<u64> = counts.values().map(|per_hour| per_hour[hour]).collect();
        totals.push(row.iter().sum());
        rows.push(row);
    }

    HourlyActivity {
        senders,
        rows,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ARCHIVE_TZ;
    use chrono::TimeZone;

    fn msg_on(id: u64, sender: &str, y: i32, mo: u32, d: u32, h: u32) -> Message {
        let ts = ARCHIVE_TZ.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap();
        Message::new(id, sender, Some("hi".into()), ts)
    }

    // =========================================================================
    // Hourly
    // =========================================================================

    #[test]
    fn test_hourly_always_24_rows() {
        let messages = vec![msg_on(0, "Alice", 2023, 6, 15, 9)];
        let hourly = hourly_activity(&messages);
        assert_eq!(hourly.rows.len(), 24);
        assert_eq!(hourly.totals.len(), 24);
        assert_eq!(hourly.totals[9], 1);
        assert_eq!(hourly.totals.iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_hourly_empty_input() {
        let hourly = hourly_activity(&[]);
        assert_eq!(hourly.rows.len(), 24);
        assert!(hourly.senders.is_empty());
        assert!(hourly.totals.iter().all(|t| *t == 0));
    }

    #[test]
    fn test_hourly_per_sender_columns() {
        let messages = vec![
            msg_on(0, "Alice", 2023, 6, 15, 9),
            msg_on(1, "Alice", 2023, 6, 15, 9),
            msg_on(2, "Bob", 2023, 6, 15, 22),
        ];
        let hourly = hourly_activity(&messages);
        assert_eq!(hourly.senders, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(hourly.rows[9], vec![2, 0]);
        assert_eq!(hourly.rows[22], vec![0, 1]);
        assert_eq!(hourly.totals[9], 2);
    }

    #[test]
    fn test_hourly_total_equals_message_count() {
        let messages: Vec<Message> = (0..50)
            .map(|i| msg_on(i, if i % 2 == 0 { "A" } else { "B" }, 2023, 6, 15, (i % 24) as u32))
            .collect();
        let hourly = hourly_activity(&messages);
        assert_eq!(hourly.totals.iter().sum::<u64>(), 50);
    }

    // =========================================================================
    // Daily rolling
    // =========================================================================

    #[test]
    fn test_daily_warmup_is_none() {
        // Three observed days: window of 7 never fills.
        let messages = vec![
            msg_on(0, "Alice", 2023, 1, 1, 10),
            msg_on(1, "Alice", 2023, 1, 2, 10),
            msg_on(2, "Alice", 2023, 1, 3, 10),
        ];
        let daily = daily_activity(&messages);
        assert_eq!(daily.dates.len(), 3);
        assert!(daily.rows.iter().all(|row| row[0].is_none()));
        assert!(daily.totals.iter().all(|t| *t == 0.0));
    }

    #[test]
    fn test_daily_window_fills_on_seventh_observation() {
        // Seven consecutive days, 2 messages each: mean = 2.0 on day 7.
        let mut messages = Vec::new();
        let mut id = 0;
        for day in 1..=7 {
            for _ in 0..2 {
                messages.push(msg_on(id, "Alice", 2023, 1, day, 10));
                id += 1;
            }
        }
        let daily = daily_activity(&messages);
        assert_eq!(daily.rows[5][0], None);
        assert_eq!(daily.rows[6][0], Some(2.0));
        assert_eq!(daily.totals[6], 2.0);
    }

    #[test]
    fn test_daily_missing_combination_is_zero() {
        let mut messages = Vec::new();
        let mut id = 0;
        // Alice posts on 7 days; Bob posts once.
        for day in 1..=7 {
            messages.push(msg_on(id, "Alice", 2023, 1, day, 10));
            id += 1;
        }
        messages.push(msg_on(id, "Bob", 2023, 1, 3, 11));

        let daily = daily_activity(&messages);
        let bob = daily.senders.iter().position(|s| s == "Bob").unwrap();
        // Bob's single observation is warm-up None; his absent days are 0.
        let jan1 = daily.dates.iter().position(|d| d.to_string() == "2023-01-01").unwrap();
        let jan3 = daily.dates.iter().position(|d| d.to_string() == "2023-01-03").unwrap();
        assert_eq!(daily.rows[jan1][bob], Some(0.0));
        assert_eq!(daily.rows[jan3][bob], None);
    }

    #[test]
    fn test_daily_window_is_per_sender_series() {
        // Alice posts 14 days; Bob posts the last 7 of them. Bob's window
        // fills on his own 7th observation, not on the calendar's.
        let mut messages = Vec::new();
        let mut id = 0;
        for day in 1..=14 {
            messages.push(msg_on(id, "Alice", 2023, 1, day, 10));
            id += 1;
            if day >= 8 {
                messages.push(msg_on(id, "Bob", 2023, 1, day, 11));
                id += 1;
            }
        }
        let daily = daily_activity(&messages);
        let bob = daily.senders.iter().position(|s| s == "Bob").unwrap();
        let jan13 = daily.dates.iter().position(|d| d.to_string() == "2023-01-13").unwrap();
        let jan14 = daily.dates.iter().position(|d| d.to_string() == "2023-01-14").unwrap();
        assert_eq!(daily.rows[jan13][bob], None);
        assert_eq!(daily.rows[jan14][bob], Some(1.0));
    }

    #[test]
    fn test_daily_margin_sums_defined_cells() {
        let mut messages = Vec::new();
        let mut id = 0;
        for day in 1..=7 {
            messages.push(msg_on(id, "Alice", 2023, 1, day, 10));
            id += 1;
            messages.push(msg_on(id, "Bob", 2023, 1, day, 11));
            id += 1;
        }
        let daily = daily_activity(&messages);
        // Day 7: both windows full at 1.0 each.
        assert_eq!(daily.totals[6], 2.0);
    }

    #[test]
    fn test_daily_empty_input() {
        let daily = daily_activity(&[]);
        assert!(daily.dates.is_empty());
        assert!(daily.senders.is_empty());
        assert!(daily.rows.is_empty());
    }
}
