//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They stick to
//! read-only commands so they don't disturb a user's persisted state.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "livepulse-cli", "--"])
        .args(args)
        .env("LIVEPULSE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn timeline_show_lists_all_milestones() {
    let (stdout, _stderr, code) = run_cli(&["timeline", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1956"));
    assert!(stdout.contains("2025"));
    assert_eq!(stdout.lines().count(), 8);
}

#[test]
fn timeline_show_single_index() {
    let (stdout, _stderr, code) = run_cli(&["timeline", "show", "--index", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ChatGPT Goes Viral"));
}

#[test]
fn timeline_show_rejects_out_of_range_index() {
    let (_stdout, stderr, code) = run_cli(&["timeline", "show", "--index", "99"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"));
}

#[test]
fn timeline_next_wraps_at_the_end() {
    let (stdout, _stderr, code) = run_cli(&["timeline", "next", "--from", "7"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("[0]"));
    assert!(stdout.contains("1956"));
}

#[test]
fn timeline_prev_wraps_at_the_start() {
    let (stdout, _stderr, code) = run_cli(&["timeline", "prev"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("[7]"));
    assert!(stdout.contains("2025"));
}

#[test]
fn timeline_jump_clamps_out_of_range() {
    let (stdout, _stderr, code) = run_cli(&["timeline", "jump", "999"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("[7]"));
}

#[test]
fn config_path_prints_a_path() {
    let (stdout, _stderr, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn stats_show_prints_three_counters() {
    let (stdout, _stderr, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("AI training"));
    assert!(stdout.contains("unprepared"));
}

#[test]
fn stats_show_json_is_valid() {
    let (stdout, _stderr, code) = run_cli(&["stats", "show", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("training_searches").is_some());
    assert!(parsed.get("unprepared_pct").is_some());
}
