//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the CLI argument structure. Without
//! `--chat` the binary lists the conversations found in the archive; with it
//! the named conversation is loaded, analyzed and printed as a plain-text
//! report. All top-N truncation and number formatting happens in the binary,
//! on top of the engine's full tables.

use clap::Parser;

use crate::analysis::words::DEFAULT_MIN_WORD_LENGTH;

/// Summarize an exported Messenger archive: message totals, leaderboards,
/// reaction patterns, activity rhythms and streaks.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatwrap")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatwrap data/
    chatwrap data/ --chat \"Weekend Plans\"
    chatwrap data/ --chat \"Weekend Plans\" --top 20
    chatwrap data/ --chat \"Weekend Plans\" --min-word-length 4")]
pub struct Args {
    /// Path to the archive directory of conversation folders
    pub archive: String,

    /// Conversation title to analyze (omit to list conversations)
    #[arg(short, long, value_name = "TITLE")]
    pub chat: Option<String>,

    /// How many entries to show in top-N sections
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Minimum token length for the word-frequency table
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_WORD_LENGTH)]
    pub min_word_length: usize,

    /// Keep reaction-notification rows when loading
    #[arg(long)]
    pub keep_notifications: bool,
}
