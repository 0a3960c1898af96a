//! Per-person message statistics.

use std::collections::BTreeMap;

use crate::analysis::reactions::ReactionSummary;
use crate::analysis::round2;
use crate::analysis::words::count_shouted_words;
use crate::message::Message;

/// One sender's leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonStats {
    pub sender: String,
    pub messages_sent: u64,
    /// Sum of per-message word counts.
    pub words_sent: u64,
    /// Sum of per-message all-caps word counts.
    pub words_shouted: u64,
    /// `words_shouted / words_sent × 100`, rounded to 2 decimals.
    /// `None` when no words were sent.
    pub shouting_percentage: Option<f64>,
    pub reactions_sent: u64,
    pub reactions_received: u64,
    /// See [`ReactionSummary::receive_sent_ratio`].
    pub receive_sent_ratio: Option<f64>,
}

/// Builds one row per sender, merged with the reaction summary by identity.
///
/// The merge is an inner join: a sender with zero reactions sent *and*
/// received is dropped from the result. Rows are in ascending sender order.
pub fn person_stats(messages: &[Message], reaction_summary: &[ReactionSummary]) -> Vec<PersonStats> {
    #[derive(Default)]
    struct Acc {
        messages: u64,
        words: u64,
        shouted: u64,
    }

    let mut by_sender: BTreeMap<&str, Acc> = BTreeMap::new();
    for msg in messages {
        let acc = by_sender.entry(&msg.sender).or_default();
        acc.messages += 1;
        acc.words += msg.num_words;
        acc.shouted += msg.content.as_deref().map_or(0, count_shouted_words);
    }

    let reactions: BTreeMap<&str, &ReactionSummary> = reaction_summary
        .iter()
        .map(|summary| (summary.person.as_str(), summary))
        .collect();

    by_sender
        .into_iter()
        .filter_map(|(sender, acc)| {
            let summary = reactions.get(sender)?;
            let shouting_percentage =
                (acc.words > 0).then(|| round2(acc.shouted as f64 / acc.words as f64 * 100.0));
            Some(PersonStats {
                sender: sender.to_string(),
                messages_sent: acc.messages,
                words_sent: acc.words,
                words_shouted: acc.shouted,
                shouting_percentage,
                reactions_sent: summary.reactions_sent,
                reactions_received: summary.reactions_received,
                receive_sent_ratio: summary.receive_sent_ratio,
            })
        })
        .collect()
}
