//! Archive discovery and conversation loading.
//!
//! A Messenger archive is a directory of conversation folders, each holding
//! one or more JSON batch files. [`MessengerArchive`] scans the directory
//! once at construction, building folder↔title maps and per-conversation
//! message counts, then loads individual conversations on demand:
//!
//! ```rust,no_run
//! use chatwrap::loader::MessengerArchive;
//!
//! # fn main() -> chatwrap::error::Result<()> {
//! let archive = MessengerArchive::open("data")?;
//!
//! for title in archive.chat_names() {
//!     println!("{title}: {} messages", archive.chat_size(title).unwrap_or(0));
//! }
//!
//! let messages = archive.load_conversation("Weekend Plans")?;
//! # Ok(())
//! # }
//! ```
//!
//! Loading merges all batch files of a conversation, sorts by timestamp
//! (stable, so equal instants keep file order) and assigns dense zero-based
//! message identifiers in chronological position. Reaction-notification rows
//! are removed by default.

pub mod export;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ChatwrapError, Result};
use crate::message::Message;

pub use export::{Normalizer, fix_mojibake_encoding, parse_ms_timestamp};

/// An opened Messenger export directory.
///
/// Discovery is lenient: unreadable or malformed files are skipped with a
/// warning so one broken batch doesn't hide the rest of the archive. Loading
/// a specific conversation is strict; there every batch file must parse.
#[derive(Debug)]
pub struct MessengerArchive {
    root: PathBuf,
    normalizer: Normalizer,
    folder_to_title: BTreeMap<String, String>,
    title_to_folder: BTreeMap<String, String>,
    chat_sizes: BTreeMap<String, usize>,
}

impl MessengerArchive {
    /// Opens an archive root directory and scans its conversation folders.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the root cannot be read. Individual broken
    /// batch files do not fail the scan.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let mut archive = Self {
            root: root.as_ref().to_path_buf(),
            normalizer: Normalizer::new(),
            folder_to_title: BTreeMap::new(),
            title_to_folder: BTreeMap::new(),
            chat_sizes: BTreeMap::new(),
        };
        archive.scan()?;
        Ok(archive)
    }

    /// Initializes the folder↔title maps and message counts by reading every
    /// batch file once.
    fn scan(&mut self) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let folder_name = entry.file_name().to_string_lossy().into_owned();
            let batch_files = batch_files_in(&path)?;
            if batch_files.is_empty() {
                continue;
            }

            let mut chat_title: Option<String> = None;
            let mut total_messages = 0usize;

            for file in &batch_files {
                let content = match fs::read_to_string(file) {
                    Ok(content) => content,
                    Err(err) => {
                        warn!(path = %file.display(), error = %err, "skipping unreadable batch file");
                        continue;
                    }
                };
                match self.normalizer.parse_batch(&content) {
                    Ok((title, messages)) => {
                        if chat_title.is_none() {
                            chat_title = title;
                        }
                        total_messages += messages.len();
                    }
                    Err(err) => {
                        warn!(path = %file.display(), error = %err, "skipping malformed batch file");
                    }
                }
            }

            if let Some(title) = chat_title {
                debug!(
                    folder = %folder_name,
                    title = %title,
                    files = batch_files.len(),
                    messages = total_messages,
                    "discovered conversation"
                );
                self.folder_to_title
                    .insert(folder_name.clone(), title.clone());
                self.title_to_folder.insert(title.clone(), folder_name);
                self.chat_sizes.insert(title, total_messages);
            }
        }
        Ok(())
    }

    /// Mapping of folder names to conversation titles.
    pub fn folder_to_title(&self) -> &BTreeMap<String, String> {
        &self.folder_to_title
    }

    /// Mapping of conversation titles to folder names.
    pub fn title_to_folder(&self) -> &BTreeMap<String, String> {
        &self.title_to_folder
    }

    /// Total message count for a conversation title.
    pub fn chat_size(&self, title: &str) -> Option<usize> {
        self.chat_sizes.get(title).copied()
    }

    /// Conversation titles sorted by message count, largest first.
    ///
    /// Equal-sized conversations stay in title order.
    pub fn chat_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.title_to_folder.keys().map(String::as_str).collect();
        names.sort_by_key(|title| std::cmp::Reverse(self.chat_sizes.get(*title).copied().unwrap_or(0)));
        names
    }

    /// Batch file paths of a conversation, in filename order.
    pub fn chat_files(&self, title: &str) -> Result<Vec<PathBuf>> {
        let folder = self
            .title_to_folder
            .get(title)
            .ok_or_else(|| ChatwrapError::chat_not_found(title))?;
        batch_files_in(&self.root.join(folder))
    }

    /// Loads a conversation with reaction-notification rows removed.
    pub fn load_conversation(&self, title: &str) -> Result<Vec<Message>> {
        self.load_conversation_with(title, false)
    }

    /// Loads a conversation, optionally keeping reaction-notification rows.
    ///
    /// All batch files are parsed strictly, concatenated, sorted by
    /// timestamp, and assigned dense zero-based identifiers.
    pub fn load_conversation_with(
        &self,
        title: &str,
        keep_notifications: bool,
    ) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = Vec::new();

        for file in self.chat_files(title)? {
            let content = fs::read_to_string(&file)?;
            let (_, batch) = self
                .normalizer
                .parse_batch(&content)
                .map_err(|err| match err {
                    ChatwrapError::Parse { source, .. } => {
                        ChatwrapError::batch_parse(source, Some(file.clone()))
                    }
                    other => other,
                })?;
            messages.extend(batch);
        }

        if !keep_notifications {
            messages.retain(|m| !m.is_reaction);
        }

        // Stable sort keeps file order for equal instants; ids follow
        // chronological position.
        messages.sort_by_key(|m| m.timestamp);
        for (id, msg) in messages.iter_mut().enumerate() {
            msg.message_id = id as u64;
        }

        debug!(title = %title, messages = messages.len(), "loaded conversation");
        Ok(messages)
    }
}

/// JSON files directly inside a conversation folder, sorted by filename.
fn batch_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    Ok(files)
}
