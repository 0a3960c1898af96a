//! Synthetic archive generator for stress testing chatwrap.
//!
//! Usage: cargo run --bin gen_archive --features gen-test -- [messages] [output] [batches]
//! Example: cargo run --bin gen_archive --features gen-test -- 100000 test_archive 4

use std::env;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::json;

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "🔥FireUser🔥",
];

const EMOJIS: &[&str] = &[
    "❤", "😂", "👍", "😮", "😢", "😡", "🔥", "🎉", "💀", "🤷‍♀️",
];

const PHRASES: &[&str] = &[
    "did you see that game last night",
    "running late again sorry",
    "pizza tonight?",
    "HAHAHA NO WAY",
    "Привет, как дела?",
    "happy birthday!!! 🎉🎉",
    "ok",
    "THIS IS AMAZING",
    "let me check and get back to you",
    "lol",
    "see you at the usual place",
    "こんにちは、元気ですか",
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("test_archive");
    let batches: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(4);

    println!("🧪 Archive Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Batches:  {}", batches);
    println!();

    generate_archive(count, output, batches.max(1));
}

fn generate_archive(count: usize, output: &str, batches: usize) {
    let chat_dir = Path::new(output).join("synthetic_chat_ab12cd");
    fs::create_dir_all(&chat_dir).expect("Failed to create chat folder");

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let per_batch = count.div_ceil(batches);
    let mut generated = 0usize;

    for batch in 0..batches {
        let batch_count = per_batch.min(count - generated);
        let path = chat_dir.join(format!("message_{}.json", batch + 1));
        let file = File::create(&path).expect("Failed to create batch file");
        let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

        let mut messages = Vec::with_capacity(batch_count);
        for i in 0..batch_count {
            let index = generated + i;
            messages.push(generate_message(&mut rng, index));
        }

        let export = json!({
            "title": "Synthetic Chat",
            "messages": messages,
        });
        serde_json::to_writer(&mut writer, &export).expect("Failed to write batch");
        writer.flush().expect("Failed to flush batch");

        generated += batch_count;
        let elapsed = start.elapsed().as_secs_f64();
        eprintln!(
            "   Batch {}/{}: {} messages ({:.0} msg/s)",
            batch + 1,
            batches,
            generated,
            generated as f64 / elapsed.max(f64::EPSILON)
        );
    }

    println!("\n✅ Done!");
    println!("   Folder: {}", chat_dir.display());
    println!("   Time:   {:.2}s", start.elapsed().as_secs_f64());
}

fn generate_message(rng: &mut impl Rng, index: usize) -> serde_json::Value {
    let sender = *SENDERS.choose(rng).unwrap();
    // One year of traffic, roughly a message every few minutes.
    let timestamp_ms = 1_672_531_200_000i64 + (index as i64) * 197_000;

    // Occasionally a notification row instead of a real message.
    if index % 37 == 17 {
        let emoji = *EMOJIS.choose(rng).unwrap();
        return json!({
            "sender_name": sender,
            "timestamp_ms": timestamp_ms,
            "content": format!("{sender} reacted {emoji} to your message"),
        });
    }

    let content = *PHRASES.choose(rng).unwrap();
    let mut message = json!({
        "sender_name": sender,
        "timestamp_ms": timestamp_ms,
        "content": content,
    });

    // Sprinkle reactions on ~1 in 5 messages.
    if rng.gen_range(0..5) == 0 {
        let reaction_count = rng.gen_range(1..=3);
        let reactions: Vec<serde_json::Value> = (0..reaction_count)
            .map(|_| {
                json!({
                    "reaction": *EMOJIS.choose(rng).unwrap(),
                    "actor": *SENDERS.choose(rng).unwrap(),
                    "timestamp": timestamp_ms / 1000 + rng.gen_range(5..7200),
                })
            })
            .collect();
        message["reactions"] = json!(reactions);
    }

    // And photos on ~1 in 12.
    if rng.gen_range(0..12) == 0 {
        message["photos"] = json!([{"uri": format!("photos/img_{index}.jpg")}]);
    }

    message
}
