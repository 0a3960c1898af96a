//! Reaction extraction and aggregation.
//!
//! Messages carry their reactions as a nested list; analysis wants one row
//! per reaction. [`extract_reactions`] explodes the lists, replicating the
//! parent message's sender, timestamp and identifier onto every row and
//! deriving the recipient/reactor/pair fields. The aggregations below
//! ([`summarize_reactions`], [`reaction_crosstab`]) all work off that
//! exploded table.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::analysis::round2;
use crate::message::{ARCHIVE_TZ, Message};

/// Label of the margin row/column in cross-tabulations.
pub const MARGIN_LABEL: &str = "All";

/// One exploded reaction row.
///
/// `recipient` is the sender of the parent message; `pair` is the unordered
/// (lexicographically sorted) participant pair, used to detect symmetric
/// reaction relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Identifier of the parent message.
    pub message_id: u64,
    /// Sender of the parent message.
    pub recipient: String,
    /// The reaction's emoji/symbol value.
    pub emoji: String,
    /// The person who reacted.
    pub reactor: String,
    /// When the parent message was sent.
    pub message_timestamp: DateTime<Tz>,
    /// When the reaction was made, where the export carries it.
    pub reaction_timestamp: Option<DateTime<Tz>>,
    /// Seconds between message and reaction. Seconds component of the delta
    /// only; days and sign are discarded.
    pub latency_secs: Option<i64>,
    /// Unordered participant pair, sorted lexicographically.
    pub pair: (String, String),
}

/// Explodes reaction lists into one row per reaction.
///
/// Messages without reactions contribute nothing. The input table is only
/// read, never mutated.
pub fn extract_reactions(messages: &[Message]) -> Vec<Reaction> {
    let mut rows = Vec::new();
    for msg in messages.iter().filter(|m| m.has_reactions()) {
        for record in &msg.reactions {
            let reaction_timestamp = record.timestamp.and_then(reaction_instant);
            let latency_secs = reaction_timestamp
                .map(|ts| (ts - msg.timestamp).num_seconds().rem_euclid(86_400));
            rows.push(Reaction {
                message_id: msg.message_id,
                recipient: msg.sender.clone(),
                emoji: record.reaction.clone(),
                reactor: record.actor.clone(),
                message_timestamp: msg.timestamp,
                reaction_timestamp,
                latency_secs,
                pair: sorted_pair(&record.actor, &msg.sender),
            });
        }
    }
    rows
}

/// Converts a reaction's Unix-seconds instant into the archive timezone.
fn reaction_instant(secs: i64) -> Option<DateTime<Tz>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.with_timezone(&ARCHIVE_TZ))
}

fn sorted_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Per-person reaction totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSummary {
    pub person: String,
    /// Reactions this person made on others' messages.
    pub reactions_sent: u64,
    /// Reactions others made on this person's messages.
    pub reactions_received: u64,
    /// `received / (sent + received)`, rounded to 2 decimals.
    /// `None` when the person has no reactions at all.
    pub receive_sent_ratio: Option<f64>,
}

/// Summarizes reaction flows per person.
///
/// Everyone who sent or received at least one reaction appears; the side
/// they never touched counts zero (outer join on identity). Rows are ordered
/// by reactions received, descending; ties keep ascending person order.
pub fn summarize_reactions(reactions: &[Reaction]) -> Vec<ReactionSummary> {
    let mut sent: BTreeMap<&str, u64> = BTreeMap::new();
    let mut received: BTreeMap<&str, u64> = BTreeMap::new();
    for r in reactions {
        *sent.entry(&r.reactor).or_insert(0) += 1;
        *received.entry(&r.recipient).or_insert(0) += 1;
    }

    let people: BTreeSet<&str> = sent.keys().chain(received.keys()).copied().collect();
    let mut rows: Vec<ReactionSummary> = people
        .into_iter()
        .map(|person| {
            let reactions_sent = sent.get(person).copied().unwrap_or(0);
            let reactions_received = received.get(person).copied().unwrap_or(0);
            let total = reactions_sent + reactions_received;
            let receive_sent_ratio =
                (total > 0).then(|| round2(reactions_received as f64 / total as f64));
            ReactionSummary {
                person: person.to_string(),
                reactions_sent,
                reactions_received,
                receive_sent_ratio,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.reactions_received.cmp(&a.reactions_received));
    rows
}

/// Which side of a reaction a cross-tabulation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossTabSide {
    /// Count by the parent message's sender.
    Received,
    /// Count by the person who reacted.
    Sent,
}

/// Emoji × person count matrix with margin totals.
///
/// The margin row (labeled [`MARGIN_LABEL`]) holds per-person column totals
/// and participates in the descending sort, so it sits first whenever its
/// grand total strictly exceeds every single emoji's. Each row's `total`
/// field is the margin column.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionCrossTab {
    /// Column order: people sorted by name.
    pub people: Vec<String>,
    /// Rows sorted by `total` descending (stable; ties keep emoji order).
    pub rows: Vec<CrossTabRow>,
}

/// One row of a [`ReactionCrossTab`].
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTabRow {
    /// Emoji value, or [`MARGIN_LABEL`] for the totals row.
    pub emoji: String,
    /// Count per person, aligned with `ReactionCrossTab::people`.
    pub counts: Vec<u64>,
    /// Margin: total across people.
    pub total: u64,
}

impl ReactionCrossTab {
    /// Looks up the count for an emoji/person combination.
    pub fn get(&self, emoji: &str, person: &str) -> Option<u64> {
        let col = self.people.iter().position(|p| p == person)?;
        self.rows
            .iter()
            .find(|row| row.emoji == emoji)
            .map(|row| row.counts[col])
    }

    /// Rows without the margin row, for display layers that draw their own
    /// totals.
    pub fn emoji_rows(&self) -> impl Iterator<Item = &CrossTabRow> {
        self.rows.iter().filter(|row| row.emoji != MARGIN_LABEL)
    }

    /// The grand total count, taken from the margin row.
    pub fn grand_total(&self) -> u64 {
        self.rows
            .iter()
            .find(|row| row.emoji == MARGIN_LABEL)
            .map_or(0, |row| row.total)
    }
}

/// Cross-tabulates reactions as an emoji × person matrix with margins.
///
/// Combinations that never occurred are filled with 0.
pub fn reaction_crosstab(reactions: &[Reaction], side: CrossTabSide) -> ReactionCrossTab {
    fn person_of(side: CrossTabSide, r: &Reaction) -> &str {
        match side {
            CrossTabSide::Received => r.recipient.as_str(),
            CrossTabSide::Sent => r.reactor.as_str(),
        }
    }

    let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    let mut people: BTreeSet<&str> = BTreeSet::new();
    for r in reactions {
        let person = person_of(side, r);
        people.insert(person);
        *counts
            .entry(r.emoji.as_str())
            .or_default()
            .entry(person)
            .or_insert(0) += 1;
    }

    let people: Vec<String> = people.into_iter().map(str::to_string).collect();
    let mut rows: Vec<CrossTabRow> = counts
        .iter()
        .map(|(emoji, by_person)| {
            let counts: Vec<u64> = people
                .iter()
                .map(|p| by_person.get(p.as_str()).copied().unwrap_or(0))
                .collect();
            let total = counts.iter().sum();
            CrossTabRow {
                emoji: (*emoji).to_string(),
                counts,
                total,
            }
        })
        .collect();

    // Margin row: per-person column totals plus the grand total.
    let column_totals: Vec<u64> = (0..people.len())
        .map(|col| rows.iter().map(|row| row.counts[col]).sum())
        .collect();
    let grand_total = column_totals.iter().sum();
    rows.push(CrossTabRow {
        emoji: MARGIN_LABEL.to_string(),
        counts: column_totals,
        total: grand_total,
    });

    rows.sort_by(|a, b| b.total.cmp(&a.total));

    ReactionCrossTab { people, rows }
}
