//! End-to-end tests for the `evstat` binary.
//!
//! Each test runs against its own temporary database: add events, then
//! check status and listings through the real binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn evstat_binary() -> String {
    env!("CARGO_BIN_EXE_evstat").to_string()
}

/// Runs `evstat` with an isolated home directory and database.
fn evstat(temp: &Path, args: &[&str]) -> Output {
    Command::new(evstat_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env("EVSTAT_DATABASE_PATH", temp.join("data/evstat.db"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run evstat")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "evstat should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_status_lifecycle_at_pinned_instants() {
    let temp = TempDir::new().unwrap();
    let output = evstat(
        temp.path(),
        &[
            "add",
            "team-a",
            "--end",
            "2025-01-02T00:00:00Z",
            "--review-hours",
            "1",
            "--id",
            "sprint-1",
        ],
    );
    assert_eq!(stdout(&output), "Recorded event sprint-1 for team-a.\n");

    let cases = [
        ("2025-01-01T23:59:59.999Z", "active"),
        ("2025-01-02T00:00:00Z", "active"),
        ("2025-01-02T00:00:00.001Z", "in review"),
        ("2025-01-02T01:00:00Z", "in review"),
        ("2025-01-02T01:00:00.001Z", "done"),
    ];
    for (at, expected) in cases {
        let output = evstat(temp.path(), &["status", "team-a", "--at", at]);
        assert_eq!(stdout(&output), format!("team-a: {expected}\n"), "at {at}");
    }
}

#[test]
fn test_status_uses_latest_event() {
    let temp = TempDir::new().unwrap();
    for (id, end) in [("old", "2020-01-01T00:00:00Z"), ("new", "2099-01-01T00:00:00Z")] {
        let output = evstat(temp.path(), &["add", "team-a", "--end", end, "--id", id]);
        stdout(&output);
    }

    let output = evstat(temp.path(), &["status", "team-a"]);
    assert_eq!(stdout(&output), "team-a: active\n");
}

#[test]
fn test_status_without_events_is_done() {
    let temp = TempDir::new().unwrap();

    let output = evstat(temp.path(), &["status", "nobody", "--json"]);

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["group_id"], "nobody");
    assert_eq!(parsed["status"], "done");
    assert!(parsed.get("at").is_none());
}

#[test]
fn test_events_lists_recorded_events() {
    let temp = TempDir::new().unwrap();
    let output = evstat(
        temp.path(),
        &["add", "team-a", "--end", "2025-01-02T00:00:00Z", "--id", "sprint-1"],
    );
    stdout(&output);

    let output = evstat(temp.path(), &["events", "team-a"]);
    assert_eq!(
        stdout(&output),
        "Events for team-a:\n- sprint-1: ends 2025-01-02T00:00:00.000000000Z, no review window\n"
    );
}

#[test]
fn test_invalid_review_hours_fails() {
    let temp = TempDir::new().unwrap();

    let output = evstat(
        temp.path(),
        &[
            "add",
            "team-a",
            "--end",
            "2025-01-02T00:00:00Z",
            "--review-hours=-3",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid review duration"), "stderr: {stderr}");
}

#[test]
fn test_sub_millisecond_end_date_keeps_boundary() {
    let temp = TempDir::new().unwrap();
    let end = "2025-01-02T00:00:00.000500Z";
    let output = evstat(
        temp.path(),
        &["add", "g", "--end", end, "--review-hours", "1", "--id", "e1"],
    );
    stdout(&output);

    let output = evstat(temp.path(), &["status", "g", "--at", end]);
    assert_eq!(stdout(&output), "g: active\n");

    let output = evstat(temp.path(), &["status", "g", "--at", "2025-01-02T00:00:00.000500001Z"]);
    assert_eq!(stdout(&output), "g: in review\n");
}
