//! Unified error types for chatwrap.
//!
//! This module provides a single [`ChatwrapError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Degenerate arithmetic (a shouting percentage with zero words sent, a
//! reaction ratio with zero reactions) is *not* an error: those values are
//! `Option<f64>` and come back as `None`. Only unusable input aborts an
//! analysis, via [`ChatwrapError::Input`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatwrap operations.
///
/// This type is broadly used across the library for any operation that
/// may produce an error.
///
/// # Example
///
/// ```rust
/// use chatwrap::error::Result;
/// use chatwrap::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatwrapError>;

/// The error type for all chatwrap operations.
///
/// This enum represents all possible errors that can occur when using
/// chatwrap. Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatwrapError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The archive directory doesn't exist
    /// - Permission denied
    /// - A batch file disappears mid-read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse a message batch file.
    ///
    /// Contains the underlying JSON error and optionally the file path.
    #[error("Failed to parse message batch{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file structure doesn't match a Messenger export.
    ///
    /// This occurs when:
    /// - A batch file is missing the "messages" array
    /// - A message row lacks a required field (sender, timestamp)
    #[error("Invalid archive format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// No conversation with the given title exists in the archive.
    #[error("Conversation '{title}' not found in archive")]
    ChatNotFound {
        /// The title that was requested
        title: String,
    },

    /// The message table cannot be analyzed.
    ///
    /// Raised before any statistics are computed; no partial results are
    /// produced.
    #[error("Unusable input table: {kind}")]
    Input {
        /// What makes the table unusable
        kind: InputErrorKind,
    },
}

/// Kinds of unusable-input conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputErrorKind {
    /// The table has no rows left once reaction notifications are removed.
    #[error("no messages remain after removing reaction notifications")]
    EmptyTable,
    /// The table holds no calendar dates to scan for streaks.
    #[error("no message dates available")]
    NoDates,
    /// A required field was absent from a message row.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatwrapError {
    /// Creates a parse error for a batch file.
    pub fn batch_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatwrapError::Parse { source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        ChatwrapError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an unknown-conversation error.
    pub fn chat_not_found(title: impl Into<String>) -> Self {
        ChatwrapError::ChatNotFound {
            title: title.into(),
        }
    }

    /// Creates the empty-table input error.
    pub fn empty_table() -> Self {
        ChatwrapError::Input {
            kind: InputErrorKind::EmptyTable,
        }
    }

    /// Creates the no-dates input error.
    pub fn no_dates() -> Self {
        ChatwrapError::Input {
            kind: InputErrorKind::NoDates,
        }
    }

    /// Creates a missing-field input error.
    pub fn missing_field(field: &'static str) -> Self {
        ChatwrapError::Input {
            kind: InputErrorKind::MissingField(field),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatwrapError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatwrapError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatwrapError::InvalidFormat { .. })
    }

    /// Returns `true` if this is an unusable-input error.
    pub fn is_input(&self) -> bool {
        matches!(self, ChatwrapError::Input { .. })
    }

    /// Returns `true` if this is an unknown-conversation error.
    pub fn is_chat_not_found(&self) -> bool {
        matches!(self, ChatwrapError::ChatNotFound { .. })
    }
}

impl From<serde_json::Error> for ChatwrapError {
    fn from(err: serde_json::Error) -> Self {
        ChatwrapError::Parse {
            source: err,
            path: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
