//! Normalized message type for analyzed conversations.
//!
//! This module provides [`Message`], the row type of the normalized message
//! table, and [`ReactionRecord`], the nested per-reaction entry. The loader
//! converts raw Messenger batch files into this structure; the analysis
//! engine consumes it and nothing else.
//!
//! # Overview
//!
//! A message consists of:
//! - **Identity**: dense zero-based `message_id`, assigned by chronological
//!   position after all batch files of a conversation are merged
//! - **Content**: `sender`, optional text `content`, reaction list, photo count
//! - **Time**: a timezone-aware timestamp fixed to the archive's region;
//!   calendar date, hour-of-day and month derive from it
//! - **Derived counts**: words, characters (spaces excluded)
//!
//! # Examples
//!
//! ```
//! use chatwrap::message::{Message, ARCHIVE_TZ};
//! use chrono::TimeZone;
//!
//! let ts = ARCHIVE_TZ.with_ymd_and_hms(2023, 6, 15, 21, 30, 0).unwrap();
//! let msg = Message::new(0, "Alice", Some("Hello there".into()), ts);
//!
//! assert_eq!(msg.num_words, 2);
//! assert_eq!(msg.hour(), 21);
//! assert_eq!(msg.date().to_string(), "2023-06-15");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The fixed regional timezone every archive timestamp is converted into.
///
/// Exports store epoch instants; all calendar arithmetic (dates, hours,
/// streaks) happens in this zone, DST transitions included.
pub const ARCHIVE_TZ: Tz = chrono_tz::Australia::Sydney;

/// One reaction attached to a message.
///
/// Mirrors the export's nested reaction objects: an emoji value, the person
/// who reacted, and (when the export carries it) the Unix-seconds instant the
/// reaction was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// The emoji/symbol value of the reaction.
    pub reaction: String,

    /// Display name of the person who reacted.
    pub actor: String,

    /// When the reaction was made, in Unix **seconds**.
    ///
    /// Older exports omit this.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl ReactionRecord {
    /// Creates a reaction record without a timestamp.
    pub fn new(reaction: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            reaction: reaction.into(),
            actor: actor.into(),
            timestamp: None,
        }
    }

    /// Builder method to set the reaction instant (Unix seconds).
    #[must_use]
    pub fn with_timestamp(mut self, secs: i64) -> Self {
        self.timestamp = Some(secs);
        self
    }
}

/// A row of the normalized message table.
///
/// # Invariants
///
/// Within one loaded conversation, rows are sorted by `timestamp`
/// (non-decreasing) and `message_id` is dense and zero-based in that order.
/// The loader establishes both before handing the table out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Stable identifier, unique within the loaded conversation.
    pub message_id: u64,

    /// Display name of the message author.
    pub sender: String,

    /// Text content. `None` for pure media/system rows.
    pub content: Option<String>,

    /// When the message was sent, in [`ARCHIVE_TZ`].
    pub timestamp: DateTime<Tz>,

    /// Whether this row is a reaction-notification ("X reacted to your
    /// message") rather than a real message.
    pub is_reaction: bool,

    /// Reactions attached to this message.
    pub reactions: Vec<ReactionRecord>,

    /// Number of photo attachments.
    pub num_photos: usize,

    /// Whitespace-separated word count of `content` (0 when absent).
    pub num_words: u64,

    /// Character count of `content` with spaces removed (0 when absent).
    pub num_characters: u64,
}

impl Message {
    /// Creates a message row, deriving the word and character counts from
    /// `content`.
    pub fn new(
        message_id: u64,
        sender: impl Into<String>,
        content: Option<String>,
        timestamp: DateTime<Tz>,
    ) -> Self {
        let num_words = content
            .as_deref()
            .map_or(0, |c| c.split_whitespace().count() as u64);
        let num_characters = content
            .as_deref()
            .map_or(0, |c| c.chars().filter(|ch| *ch != ' ').count() as u64);

        Self {
            message_id,
            sender: sender.into(),
            content,
            timestamp,
            is_reaction: false,
            reactions: Vec::new(),
            num_photos: 0,
            num_words,
            num_characters,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to attach reactions.
    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<ReactionRecord>) -> Self {
        self.reactions = reactions;
        self
    }

    /// Builder method to set the photo attachment count.
    #[must_use]
    pub fn with_photos(mut self, count: usize) -> Self {
        self.num_photos = count;
        self
    }

    /// Builder method to mark this row as a reaction notification.
    #[must_use]
    pub fn with_is_reaction(mut self, flag: bool) -> Self {
        self.is_reaction = flag;
        self
    }

    // =========================================================================
    // Derived calendar fields
    // =========================================================================

    /// Calendar date of the message in the archive timezone.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Hour of day (0–23) in the archive timezone.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Month of year (1–12) in the archive timezone.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns the number of reactions attached to this message.
    pub fn num_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Returns `true` if at least one reaction is attached.
    pub fn has_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }

    /// Returns `true` if at least one photo is attached.
    pub fn has_photos(&self) -> bool {
        self.num_photos > 0
    }
}
