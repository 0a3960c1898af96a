//! Word-frequency analysis and shouting detection.
//!
//! Tokenization is linguistic, not whitespace splitting: text is
//! case-folded, segmented on UAX-29 word boundaries, and each token is
//! cleaned and filtered through an immutable [`WordFilter`] resource
//! (stop-word set + minimum length) that the caller constructs once.
//!
//! With the `parallel` feature, tokenization fans out across messages; the
//! counting fold stays sequential and ordered, so the output — including
//! tie order — is identical either way.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::message::Message;

/// Default minimum token length for the word-frequency table.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// English stop words, the standard natural-language-toolkit list.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "dont", "should", "shouldve", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "arent", "couldn", "couldnt", "didn", "didnt", "doesn",
    "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven", "havent", "isn", "isnt", "ma",
    "mightn", "mightnt", "mustn", "mustnt", "needn", "neednt", "shan", "shant", "shouldn",
    "shouldnt", "wasn", "wasnt", "weren", "werent", "won", "wont", "wouldn", "wouldnt",
];

/// Immutable tokenizer resource: stop-word set plus minimum token length.
///
/// Built once, passed into the analysis; no module-global state.
///
/// # Example
///
/// ```
/// use chatwrap::analysis::words::WordFilter;
///
/// let filter = WordFilter::english();
/// assert!(filter.keeps("birthday"));
/// assert!(!filter.keeps("the"));   // stop word
/// assert!(!filter.keeps("ok"));    // under the minimum length
/// assert!(!filter.keeps("covid19")); // not purely alphabetic
/// ```
#[derive(Debug, Clone)]
pub struct WordFilter {
    stop_words: HashSet<String>,
    min_word_length: usize,
}

impl WordFilter {
    /// Creates a filter from an explicit stop-word collection.
    pub fn new(stop_words: impl IntoIterator<Item = String>) -> Self {
        Self {
            stop_words: stop_words.into_iter().collect(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }

    /// Creates a filter with the English stop-word list.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS.iter().map(|w| (*w).to_string()))
    }

    /// Builder method to override the minimum token length.
    #[must_use]
    pub fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    /// Returns the configured minimum token length.
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Whether a cleaned token survives filtering: non-empty, long enough,
    /// not a stop word, entirely alphabetic.
    pub fn keeps(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().count() >= self.min_word_length
            && !self.stop_words.contains(token)
            && token.chars().all(char::is_alphabetic)
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::english()
    }
}

/// Strips every character that is neither alphanumeric nor whitespace.
///
/// Underscores count as word characters, matching `\w`.
fn clean_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Tokenizes one message's content into surviving word tokens.
fn tokenize(content: &str, filter: &WordFilter) -> Vec<String> {
    let lowered = content.to_lowercase();
    lowered
        .unicode_words()
        .map(clean_word)
        .filter(|token| filter.keeps(token))
        .collect()
}

/// Computes the word-frequency table over all textual message content.
///
/// Returns `(token, count)` pairs sorted by count descending; ties keep the
/// order tokens were first encountered. No top-N truncation happens here —
/// that is a display concern.
pub fn word_counts(messages: &[Message], filter: &WordFilter) -> Vec<(String, u64)> {
    #[cfg(feature = "parallel")]
    let per_message: Vec<Vec<String>> = messages
        .par_iter()
        .map(|m| m.content.as_deref().map_or_else(Vec::new, |c| tokenize(c, filter)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_message: Vec<Vec<String>> = messages
        .iter()
        .map(|m| m.content.as_deref().map_or_else(Vec::new, |c| tokenize(c, filter)))
        .collect();

    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for tokens in per_message {
        for token in tokens {
            if let Some(count) = counts.get_mut(&token) {
                *count += 1;
            } else {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut table: Vec<(String, u64)> = order
        .into_iter()
        .map(|token| {
            let count = counts.get(&token).copied().unwrap_or(0);
            (token, count)
        })
        .collect();
    // Stable: equal counts keep first-encounter order.
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Counts shouted words in a text: every cased character uppercase and more
/// than one character long, so single-letter words and initials don't count.
pub fn count_shouted_words(text: &str) -> u64 {
    text.split_whitespace().filter(|w| is_shouting(w)).count() as u64
}

fn is_shouting(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased && word.chars().count() > 1
}
