//! Photo sharing statistics.

use std::collections::BTreeMap;

use crate::message::Message;

/// One sender's photo-sharing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoStats {
    pub sender: String,
    /// Photo attachments across all of their messages.
    pub total_photos: u64,
    /// Most reactions any single photo message of theirs collected.
    pub most_reactions: u64,
}

/// Summarizes photo sharing per sender, most photos first.
///
/// Only messages carrying at least one photo participate; senders who never
/// shared a photo don't appear.
pub fn photo_stats(messages: &[Message]) -> Vec<PhotoStats> {
    #[derive(Default)]
    struct Acc {
        photos: u64,
        most_reactions: u64,
    }

    let mut by_sender: BTreeMap<&str, Acc> = BTreeMap::new();
    for msg in messages.iter().filter(|m| m.has_photos()) {
        let acc = by_sender.entry(&msg.sender).or_default();
        acc.photos += msg.num_photos as u64;
        acc.most_reactions = acc.most_reactions.max(msg.num_reactions() as u64);
    }

    let mut rows: Vec<PhotoStats> = by_sender
        .into_iter()
        .map(|(sender, acc)| PhotoStats {
            sender: sender.to_string(),
            total_photos: acc.photos,
            most_reactions: acc.most_reactions,
        })
        .collect();
    // Stable: ties keep ascending sender order.
    rows.sort_by(|a, b| b.total_photos.cmp(&a.total_photos));
    rows
}
