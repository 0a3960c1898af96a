//! Raw Messenger batch parsing and normalization.
//!
//! Handles Meta's JSON exports with Mojibake encoding fix.
//!
//! A conversation folder holds one or more batch files
//! (`message_1.json`, `message_2.json`, ...), each with a `title` and a
//! `messages` array. The main quirk is that Meta exports UTF-8 text encoded
//! as ISO-8859-1, causing non-ASCII text and emoji to appear as garbage
//! (Mojibake). Reaction notifications ("X reacted ❤ to your message") are
//! exported as ordinary message rows and are detected here by content.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;

use crate::error::ChatwrapError;
use crate::message::{ARCHIVE_TZ, Message, ReactionRecord};

/// Raw message structure for deserialization.
///
/// `sender_name` and `timestamp_ms` are required by the normalized model but
/// optional here so their absence surfaces as a typed input error rather than
/// a serde error.
#[derive(Debug, Deserialize)]
pub struct RawMessage {
    pub sender_name: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub content: Option<String>,
    #[serde(default)]
    pub reactions: Option<Vec<RawReaction>>,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
}

/// Raw reaction structure: emoji value, actor, optional Unix-seconds instant.
#[derive(Debug, Deserialize)]
pub struct RawReaction {
    pub reaction: String,
    pub actor: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Raw photo attachment structure.
#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    pub uri: Option<String>,
}

/// One batch file of a conversation export.
#[derive(Debug, Deserialize)]
pub struct RawExport {
    pub title: Option<String>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Meta exports UTF-8 text encoded as if it were ISO-8859-1.
/// Each UTF-8 byte is stored as a separate Unicode codepoint.
/// Example: "Привет" becomes "ÐŸÑ€Ð¸Ð²ÐµÑ‚"
///
/// This function reverses that process by:
/// 1. Taking each char as its byte value
/// 2. Reconstructing the original UTF-8 string
pub fn fix_mojibake_encoding(s: &str) -> String {
    let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Converts an epoch-milliseconds instant into the archive timezone.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Tz>> {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.with_timezone(&ARCHIVE_TZ))
}

/// Converts a raw batch file into normalized [`Message`] rows.
///
/// Stateless apart from the compiled notification pattern; construct once and
/// reuse across batch files.
#[derive(Debug)]
pub struct Normalizer {
    fix_encoding: bool,
    notification: Regex,
}

impl Normalizer {
    /// Creates a normalizer with Mojibake fixing enabled.
    pub fn new() -> Self {
        Self::with_fix_encoding(true)
    }

    /// Creates a normalizer with explicit encoding-fix behavior.
    pub fn with_fix_encoding(fix_encoding: bool) -> Self {
        Self {
            fix_encoding,
            // Reaction notifications keep this content shape across export
            // versions.
            notification: Regex::new(r"(?i)reacted .* to your message").unwrap(),
        }
    }

    /// Returns whether Mojibake fixing is enabled.
    pub fn fix_encoding(&self) -> bool {
        self.fix_encoding
    }

    /// Parses one batch file's content into its title and message rows.
    ///
    /// `message_id` is left at 0 on every row; identifiers are assigned by
    /// the archive loader once all batches of a conversation are merged and
    /// sorted.
    pub fn parse_batch(&self, content: &str) -> Result<(Option<String>, Vec<Message>), ChatwrapError> {
        let export: RawExport = serde_json::from_str(content)?;
        let title = export.title.map(|t| self.fix(&t));
        let messages = export
            .messages
            .into_iter()
            .map(|raw| self.normalize(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((title, messages))
    }

    /// Normalizes one raw message row.
    pub fn normalize(&self, raw: RawMessage) -> Result<Message, ChatwrapError> {
        let sender = raw
            .sender_name
            .ok_or_else(|| ChatwrapError::missing_field("sender_name"))?;
        let timestamp_ms = raw
            .timestamp_ms
            .ok_or_else(|| ChatwrapError::missing_field("timestamp_ms"))?;
        let timestamp = parse_ms_timestamp(timestamp_ms).ok_or_else(|| {
            ChatwrapError::invalid_format(format!("timestamp out of range: {timestamp_ms}"))
        })?;

        let content = raw.content.map(|c| self.fix(&c));
        let is_reaction = content
            .as_deref()
            .is_some_and(|c| self.notification.is_match(c));

        let reactions: Vec<ReactionRecord> = raw
            .reactions
            .unwrap_or_default()
            .into_iter()
            .map(|r| ReactionRecord {
                reaction: self.fix(&r.reaction),
                actor: self.fix(&r.actor),
                timestamp: r.timestamp,
            })
            .collect();

        let num_photos = raw.photos.map_or(0, |p| p.len());

        Ok(Message::new(0, self.fix(&sender), content, timestamp)
            .with_reactions(reactions)
            .with_photos(num_photos)
            .with_is_reaction(is_reaction))
    }

    fn fix(&self, s: &str) -> String {
        if self.fix_encoding {
            fix_mojibake_encoding(s)
        } else {
            s.to_string()
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
