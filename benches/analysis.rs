//! Benchmarks for chatwrap loading and analysis operations.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench analysis -- word_counts`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatwrap::analysis::{
    CrossTabSide, WordFilter, analyze, daily_activity, extract_reactions, hourly_activity,
    reaction_crosstab, word_counts,
};
use chatwrap::loader::Normalizer;
use chatwrap::message::{ARCHIVE_TZ, Message, ReactionRecord};

use chrono::{Duration, TimeZone};

// =============================================================================
// Test Data Generators
// =============================================================================

const PHRASES: &[&str] = &[
    "did you see that game last night",
    "running late again sorry",
    "pizza tonight?",
    "HAHAHA NO WAY",
    "happy birthday!!!",
    "let me check and get back to you",
    "see you at the usual place",
];

fn generate_messages(count: usize) -> Vec<Message> {
    let base_time = ARCHIVE_TZ.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
            let ts = base_time + Duration::minutes(i as i64 * 13);
            let mut msg = Message::new(
                i as u64,
                sender,
                Some(PHRASES[i % PHRASES.len()].to_string()),
                ts,
            );
            if i % 5 == 0 {
                msg = msg.with_reactions(vec![
                    ReactionRecord::new("❤", if i % 2 == 0 { "Bob" } else { "Alice" })
                        .with_timestamp(ts.timestamp() + 120),
                ]);
            }
            msg
        })
        .collect()
}

fn generate_batch_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let timestamp = 1672531200000i64 + (i as i64 * 60000);
        messages.push(format!(
            r#"{{"sender_name": "{}", "timestamp_ms": {}, "content": "Message number {}"}}"#,
            sender, timestamp, i
        ));
    }
    format!(
        r#"{{"title": "Bench Chat", "messages": [{}]}}"#,
        messages.join(",\n")
    )
}

// =============================================================================
// Loading Benchmarks
// =============================================================================

fn bench_batch_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_parsing");
    let normalizer = Normalizer::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let json = generate_batch_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let parsed = normalizer.parse_batch(black_box(json)).unwrap();
                black_box(parsed)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Component Benchmarks
// =============================================================================

fn bench_word_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_counts");
    let filter = WordFilter::english();

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let counts = word_counts(black_box(messages), &filter);
                    black_box(counts)
                });
            },
        );
    }
    group.finish();
}

fn bench_reaction_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("reaction_pipeline");

    for size in [1_000_usize, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let reactions = extract_reactions(black_box(messages));
                    let received = reaction_crosstab(&reactions, CrossTabSide::Received);
                    let sent = reaction_crosstab(&reactions, CrossTabSide::Sent);
                    black_box((received, sent))
                });
            },
        );
    }
    group.finish();
}

fn bench_temporal(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal");

    for size in [1_000_usize, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let daily = daily_activity(black_box(messages));
                    let hourly = hourly_activity(black_box(messages));
                    black_box((daily, hourly))
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// End-to-End Benchmark
// =============================================================================

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    let filter = WordFilter::english();

    for size in [1_000_usize, 10_000, 50_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let stats = analyze(black_box(messages), &filter).unwrap();
                    black_box(stats)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_batch_parsing,
    bench_word_counts,
    bench_reaction_pipeline,
    bench_temporal,
    bench_full_analysis,
);

criterion_main!(benches);
