//! The analysis engine: turns a normalized message table into [`ChatStats`].
//!
//! One call to [`analyze`] performs the whole batch computation — totals,
//! per-person leaderboards, reaction flows, word frequencies, temporal
//! matrices and the longest streak — and assembles the immutable output
//! bundle. The engine only reads the caller's table; reaction-notification
//! rows are filtered on a defensive copy.
//!
//! ```
//! use chatwrap::analysis::{analyze, words::WordFilter};
//! use chatwrap::message::{ARCHIVE_TZ, Message};
//! use chrono::TimeZone;
//!
//! # fn main() -> chatwrap::error::Result<()> {
//! let ts = ARCHIVE_TZ.with_ymd_and_hms(2023, 6, 15, 21, 0, 0).unwrap();
//! let table = vec![Message::new(0, "Alice", Some("happy birthday".into()), ts)];
//!
//! let stats = analyze(&table, &WordFilter::english())?;
//! assert_eq!(stats.num_messages, 1);
//! assert_eq!(stats.streak.length, 1);
//! # Ok(())
//! # }
//! ```

pub mod person;
pub mod photos;
pub mod reactions;
pub mod streak;
pub mod temporal;
pub mod words;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ChatwrapError, Result};
use crate::message::Message;

pub use person::{PersonStats, person_stats};
pub use photos::{PhotoStats, photo_stats};
pub use reactions::{
    CrossTabRow, CrossTabSide, MARGIN_LABEL, Reaction, ReactionCrossTab, ReactionSummary,
    extract_reactions, reaction_crosstab, summarize_reactions,
};
pub use streak::{Streak, longest_streak};
pub use temporal::{DailyActivity, HourlyActivity, ROLLING_WINDOW, daily_activity, hourly_activity};
pub use words::{DEFAULT_MIN_WORD_LENGTH, WordFilter, count_shouted_words, word_counts};

/// The complete statistics bundle for one conversation.
///
/// Constructed once per [`analyze`] run and never mutated afterwards; a new
/// analysis supersedes the bundle wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatStats {
    /// Total messages analyzed (reaction notifications excluded).
    pub num_messages: usize,
    /// Total words across all messages.
    pub num_words: u64,
    /// Mean messages per active day, rounded to 1 decimal.
    pub avg_messages_per_day: f64,
    /// Per-sender leaderboard (see [`PersonStats`] for the join semantics).
    pub person_stats: Vec<PersonStats>,
    /// Hour-of-day activity matrix.
    pub hourly_stats: HourlyActivity,
    /// Word-frequency table, count descending.
    pub word_counts: Vec<(String, u64)>,
    /// Emoji × recipient reaction matrix.
    pub received_reaction_stats: ReactionCrossTab,
    /// Emoji × reactor reaction matrix.
    pub sent_reaction_stats: ReactionCrossTab,
    /// Date × sender rolling activity matrix.
    pub daily_stats: DailyActivity,
    /// Longest run of consecutive active days.
    pub streak: Streak,
}

/// Runs the complete analysis over a message table.
///
/// Components run in dependency order — reaction extraction feeds the
/// reaction aggregations; everything else is independent — and the results
/// are assembled into one [`ChatStats`].
///
/// # Errors
///
/// Returns an input error when the table is empty once reaction-notification
/// rows are removed; no partial statistics are produced.
pub fn analyze(messages: &[Message], word_filter: &WordFilter) -> Result<ChatStats> {
    // Defensive copy: notification rows never reach the statistics, and the
    // caller's table is never touched.
    let table: Vec<Message> = messages
        .iter()
        .filter(|m| !m.is_reaction)
        .cloned()
        .collect();
    if table.is_empty() {
        return Err(ChatwrapError::empty_table());
    }

    let num_messages = table.len();
    let num_words: u64 = table.iter().map(|m| m.num_words).sum();

    let mut per_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for msg in &table {
        *per_date.entry(msg.date()).or_insert(0) += 1;
    }
    let avg_messages_per_day = round1(num_messages as f64 / per_date.len() as f64);

    let reactions = extract_reactions(&table);
    let reaction_summary = summarize_reactions(&reactions);

    let stats = ChatStats {
        num_messages,
        num_words,
        avg_messages_per_day,
        person_stats: person_stats(&table, &reaction_summary),
        hourly_stats: hourly_activity(&table),
        word_counts: word_counts(&table, word_filter),
        received_reaction_stats: reaction_crosstab(&reactions, CrossTabSide::Received),
        sent_reaction_stats: reaction_crosstab(&reactions, CrossTabSide::Sent),
        daily_stats: daily_activity(&table),
        streak: longest_streak(table.iter().map(|m| m.date()))?,
    };

    info!(
        num_messages,
        num_words,
        reactions = reactions.len(),
        "analysis complete"
    );
    Ok(stats)
}

/// Rounds to 1 decimal, half away from zero.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Rounds to 2 decimals, half away from zero.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
