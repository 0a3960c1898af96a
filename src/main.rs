//! # chatwrap CLI
//!
//! Command-line interface for the chatwrap library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatwrap::ChatwrapError;
use chatwrap::analysis::{ChatStats, WordFilter, analyze, photo_stats};
use chatwrap::cli::Args;
use chatwrap::loader::MessengerArchive;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatwrapError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Print header
    println!("📊 chatwrap v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Archive: {}", args.archive);

    let scan_start = Instant::now();
    let archive = MessengerArchive::open(&args.archive)?;
    let scan_time = scan_start.elapsed();
    println!(
        "   Found {} conversations ({:.2}s)",
        archive.chat_names().len(),
        scan_time.as_secs_f64()
    );
    println!();

    let Some(title) = args.chat.as_deref() else {
        list_conversations(&archive);
        return Ok(());
    };

    println!("💬 Chat:    {}", title);
    if args.keep_notifications {
        println!("🔔 Keeping reaction-notification rows");
    }
    println!();

    // Step 1: Load
    println!("⏳ Loading conversation...");
    let load_start = Instant::now();
    let messages = archive.load_conversation_with(title, args.keep_notifications)?;
    println!(
        "   {} messages ({:.2}s)",
        messages.len(),
        load_start.elapsed().as_secs_f64()
    );

    // Step 2: Analyze
    println!("🧮 Computing statistics...");
    let word_filter = WordFilter::english().with_min_word_length(args.min_word_length);
    let analyze_start = Instant::now();
    let stats = analyze(&messages, &word_filter)?;
    let analyze_time = analyze_start.elapsed();
    println!("   Done ({:.2}s)", analyze_time.as_secs_f64());
    println!();

    // Step 3: Report
    print_report(&stats, args.top);

    let photos = photo_stats(&messages);
    if !photos.is_empty() {
        println!();
        println!("📷 Photos:");
        for row in photos.iter().take(args.top) {
            println!(
                "   {:<20} {:>5} photos (best message: {} reactions)",
                row.sender, row.total_photos, row.most_reactions
            );
        }
    }

    // Performance stats
    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = messages.len() as f64 / analyze_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} messages/sec analyzed", msgs_per_sec);

    Ok(())
}

/// Lists discovered conversations, largest first.
fn list_conversations(archive: &MessengerArchive) {
    println!("💬 Conversations:");
    for title in archive.chat_names() {
        let size = archive.chat_size(title).unwrap_or(0);
        println!("   {:>8}  {}", size, title);
    }
    println!();
    println!("Run again with --chat \"<title>\" to analyze one.");
}

/// Prints the year-in-review report. Top-N truncation happens here, never in
/// the engine.
fn print_report(stats: &ChatStats, top: usize) {
    println!("📈 Totals:");
    println!("   Messages:      {}", stats.num_messages);
    println!("   Words:         {}", stats.num_words);
    println!("   Avg/day:       {}", stats.avg_messages_per_day);
    println!(
        "   Streak:        {} days ({} – {})",
        stats.streak.length,
        stats.streak.start_iso(),
        stats.streak.end_iso()
    );
    println!();

    println!("🏆 People:");
    println!(
        "   {:<20} {:>9} {:>9} {:>8} {:>8} {:>6} {:>6}",
        "sender", "messages", "words", "shouted", "shout%", "sent", "recv"
    );
    for person in &stats.person_stats {
        println!(
            "   {:<20} {:>9} {:>9} {:>8} {:>8} {:>6} {:>6}",
            person.sender,
            person.messages_sent,
            person.words_sent,
            person.words_shouted,
            fmt_opt(person.shouting_percentage),
            person.reactions_sent,
            person.reactions_received,
        );
    }
    println!();

    println!("🔤 Top words:");
    for (word, count) in stats.word_counts.iter().take(top) {
        println!("   {:>6}  {}", count, word);
    }
    println!();

    println!("🕐 Activity by hour:");
    let max_hour = stats.hourly_stats.totals.iter().copied().max().unwrap_or(0);
    for (hour, total) in stats.hourly_stats.totals.iter().enumerate() {
        let width = if max_hour == 0 {
            0
        } else {
            (total * 30 / max_hour) as usize
        };
        println!("   {:02}:00 {:>7}  {}", hour, total, "█".repeat(width));
    }
    println!();

    println!("💝 Reactions received:");
    for row in stats.received_reaction_stats.emoji_rows().take(top) {
        let breakdown: Vec<String> = stats
            .received_reaction_stats
            .people
            .iter()
            .zip(&row.counts)
            .filter(|(_, count)| **count > 0)
            .map(|(person, count)| format!("{person} {count}"))
            .collect();
        println!("   {:>6}  {}  ({})", row.total, row.emoji, breakdown.join(", "));
    }
}

/// Formats an optional ratio/percentage; undefined values print as "n/a".
fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}
