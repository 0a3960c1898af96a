//! # Chatwrap
//!
//! A Rust library for turning exported Messenger chat archives into
//! year-in-review statistics: message and word totals, per-person
//! leaderboards, reaction exchange patterns, temporal activity
//! distributions, and the longest daily-messaging streak.
//!
//! ## Overview
//!
//! Chatwrap works in two stages:
//! - The **loader** discovers conversation folders in an export directory,
//!   repairs Meta's broken text encoding, parses message batches, and
//!   normalizes everything into one flat message table with
//!   timezone-localized timestamps and derived fields.
//! - The **analysis engine** consumes that table and produces an immutable
//!   [`ChatStats`](analysis::ChatStats) bundle in a single pass.
//!
//! Everything runs locally over in-memory data; nothing is persisted and no
//! network is involved.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatwrap::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = MessengerArchive::open("data")?;
//!
//!     // Conversations, largest first
//!     for title in archive.chat_names() {
//!         println!("{title}");
//!     }
//!
//!     let messages = archive.load_conversation("Weekend Plans")?;
//!     let stats = analyze(&messages, &WordFilter::english())?;
//!
//!     println!("{} messages, {} words", stats.num_messages, stats.num_words);
//!     println!(
//!         "longest streak: {} days ({} – {})",
//!         stats.streak.length,
//!         stats.streak.start_iso(),
//!         stats.streak.end_iso()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`loader`] — archive discovery and conversation loading
//!   - [`MessengerArchive`](loader::MessengerArchive) — folder↔title maps, batch merging
//!   - [`loader::export`] — raw batch parsing, Mojibake fix, normalization
//! - [`analysis`] — the statistics engine
//!   - [`analyze`](analysis::analyze) — single-pass orchestrator producing [`ChatStats`](analysis::ChatStats)
//!   - [`analysis::reactions`] — reaction extraction, per-person summary, cross-tabs
//!   - [`analysis::words`] — [`WordFilter`](analysis::words::WordFilter), word frequency, shouting
//!   - [`analysis::temporal`] — daily rolling and hourly matrices
//!   - [`analysis::streak`] — longest-consecutive-days detection
//! - [`message`] — [`Message`], [`ReactionRecord`], the archive timezone
//! - [`cli`] — CLI argument types (feature `cli`)
//! - [`error`] — unified error types ([`ChatwrapError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod loader;
pub mod message;

// Re-export the main types at the crate root for convenience
pub use error::{ChatwrapError, Result};
pub use message::{Message, ReactionRecord};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatwrap::prelude::*;
/// ```
pub mod prelude {
    // Core row types
    pub use crate::message::{ARCHIVE_TZ, Message, ReactionRecord};

    // Error types
    pub use crate::error::{ChatwrapError, InputErrorKind, Result};

    // Loading
    pub use crate::loader::MessengerArchive;

    // Analysis
    pub use crate::analysis::{ChatStats, analyze};
    pub use crate::analysis::{
        CrossTabSide, DailyActivity, HourlyActivity, PersonStats, Reaction, ReactionCrossTab,
        ReactionSummary, Streak, WordFilter,
    };
}
