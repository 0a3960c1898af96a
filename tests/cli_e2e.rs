//! End-to-end CLI tests for chatwrap.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary archive with one small conversation.
fn setup_archive() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let chat_dir = dir.path().join("weekendplans_ab12cd");
    fs::create_dir(&chat_dir).unwrap();

    let batch = r#"{
  "title": "Weekend Plans",
  "messages": [
    {"sender_name": "Alice", "timestamp_ms": 1685660400000, "content": "pizza tonight",
     "reactions": [{"reaction": "â¤", "actor": "Bob", "timestamp": 1685660460}]},
    {"sender_name": "Bob", "timestamp_ms": 1685664000000, "content": "pizza sounds GREAT YES"},
    {"sender_name": "Alice", "timestamp_ms": 1685750400000, "content": "see you there"}
  ]
}"#;
    fs::write(chat_dir.join("message_1.json"), batch).unwrap();
    dir
}

fn chatwrap() -> Command {
    Command::cargo_bin("chatwrap").expect("binary exists")
}

// ============================================================================
// List mode
// ============================================================================

#[test]
fn test_list_conversations() {
    let dir = setup_archive();
    chatwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekend Plans"))
        .stdout(predicate::str::contains("Conversations"));
}

#[test]
fn test_list_empty_archive() {
    let dir = tempdir().unwrap();
    chatwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 conversations"));
}

// ============================================================================
// Analyze mode
// ============================================================================

#[test]
fn test_analyze_prints_report() {
    let dir = setup_archive();
    chatwrap()
        .arg(dir.path())
        .args(["--chat", "Weekend Plans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Messages:      3"))
        .stdout(predicate::str::contains("Streak:"))
        .stdout(predicate::str::contains("pizza"))
        .stdout(predicate::str::contains("Reactions received"));
}

#[test]
fn test_analyze_respects_top() {
    let dir = setup_archive();
    chatwrap()
        .arg(dir.path())
        .args(["--chat", "Weekend Plans", "--top", "1"])
        .assert()
        .success()
        // "pizza" (count 2) leads; "tonight" must be cut from the top list.
        .stdout(predicate::str::contains("2  pizza"))
        .stdout(predicate::str::contains("1  tonight").not());
}

#[test]
fn test_analyze_min_word_length() {
    let dir = setup_archive();
    chatwrap()
        .arg(dir.path())
        .args(["--chat", "Weekend Plans", "--min-word-length", "6"])
        .assert()
        .success()
        // "pizza" (5 chars) drops below the threshold; "tonight" stays.
        .stdout(predicate::str::contains("tonight"))
        .stdout(predicate::str::contains("pizza").not());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_unknown_chat_fails() {
    let dir = setup_archive();
    chatwrap()
        .arg(dir.path())
        .args(["--chat", "No Such Chat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_archive_fails() {
    chatwrap()
        .arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_no_args_shows_usage() {
    chatwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage").or(predicate::str::contains("usage")));
}
