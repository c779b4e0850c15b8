//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. CHIME_ENV
//! is pinned to dev so the runs never touch a real config.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "chime-cli", "--"])
        .args(args)
        .env("CHIME_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list is not JSON");
    assert!(parsed.get("timer").is_some());
    assert!(parsed.get("notifications").is_some());
}

#[test]
fn test_config_get() {
    let (_, _, code) = run_cli(&["config", "get", "timer.tick_ms"]);
    assert_eq!(code, 0, "Config get failed");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "timer.bogus"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_set_get_reset() {
    // One test so the writes stay serialized.
    let (stdout, _, code) = run_cli(&["config", "set", "notifications.volume", "75"]);
    assert_eq!(code, 0, "Config set failed");
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&["config", "get", "notifications.volume"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "75");

    let (stdout, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");
    assert!(stdout.contains("reset"));

    let (stdout, _, code) = run_cli(&["config", "get", "notifications.volume"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let (_, _, code) = run_cli(&["config", "set", "timer.bogus", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_rejects_zero_tick() {
    let (_, _, code) = run_cli(&["config", "set", "timer.tick_ms", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "Config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(!stdout.is_empty());
}

#[test]
fn test_run_once_rings_and_exits() {
    let (stdout, _, code) = run_cli(&["run", "--interval", "0.05", "--once", "--silent"]);
    assert_eq!(code, 0, "Run --once failed");
    assert!(stdout.contains("interval 0.05s"));
    assert!(stdout.contains("ring 1"));
    assert!(stdout.contains("stopped after 1 ring"));
}

#[test]
fn test_run_ring_budget() {
    let (stdout, _, code) = run_cli(&["run", "--interval", "0.05", "--rings", "3", "--silent"]);
    assert_eq!(code, 0, "Run --rings failed");
    assert!(stdout.contains("ring 3"));
    assert!(stdout.contains("stopped after 3 ring"));
}

#[test]
fn test_run_json_emits_events() {
    let (stdout, _, code) = run_cli(&[
        "run", "--interval", "0.05", "--rings", "2", "--silent", "--json",
    ]);
    assert_eq!(code, 0, "Run --json failed");
    assert!(stdout.contains("\"type\":\"TimerArmed\""));
    assert!(stdout.contains("\"type\":\"Ring\""));
    assert!(stdout.contains("\"type\":\"TimerStopped\""));
    assert!(stdout.contains("\"type\":\"StateSnapshot\""));
    for line in stdout.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("non-JSON line in --json output");
    }
}

#[test]
fn test_run_coerces_invalid_interval_to_default() {
    // "notanumber" falls back to the 3-second default instead of failing.
    let (stdout, _, code) = run_cli(&["run", "--interval", "notanumber", "--once", "--silent"]);
    assert_eq!(code, 0, "Run with invalid interval failed");
    assert!(stdout.contains("interval 3.00s"));
}

#[test]
fn test_run_rejects_zero_ring_budget() {
    let (_, _, code) = run_cli(&["run", "--rings", "0", "--silent"]);
    assert_ne!(code, 0);
}
