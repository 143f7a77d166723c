//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against `home` and return (stdout, stderr, code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusmate"))
        .args(args)
        .env("FOCUSMATE_HOME", home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_block_add_normalizes_and_lists() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["block", "add", "https://www.YouTube.com/watch?v=1, reddit.com/r/all"]);
    run_ok(&home, &["block", "add", "youtube.com"]);

    let out = run_ok(&home, &["block", "list", "--json"]);
    let list: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(list, vec!["youtube.com", "reddit.com"]);

    run_ok(&home, &["block", "remove", "youtube.com"]);
    let out = run_ok(&home, &["block", "list"]);
    assert_eq!(out.trim(), "reddit.com");
}

#[test]
fn test_block_current_rejects_internal_pages() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(&home, &["block", "current", "--url", "chrome://extensions"]);
    assert_ne!(code, 0);
    run_ok(&home, &["block", "current", "--url", "https://news.ycombinator.com/item"]);
    let out = run_ok(&home, &["block", "check", "news.ycombinator.com"]);
    assert_eq!(out.trim(), "true");
}

#[test]
fn test_block_recommended_marks_blocked() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["block", "recommended", "https://WWW.TikTok.com/@someone"]);
    let out = run_ok(&home, &["block", "recommended"]);
    assert!(out.contains("[x] tiktok.com"));
    assert!(out.contains("[ ] youtube.com"));
    let out = run_ok(&home, &["block", "list", "--json"]);
    let list: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(list, vec!["tiktok.com"]);
}

#[test]
fn test_topic_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["topic", "add", "math"]);
    run_ok(&home, &["topic", "add", "history"]);
    run_ok(&home, &["topic", "use", "math"]);
    run_ok(&home, &["topic", "remove", "math"]);

    let out = run_ok(&home, &["topic", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["topics"], serde_json::json!(["history"]));
    assert_eq!(value["active"], "history");

    let (_, stderr, code) = run_cli(&home, &["topic", "use", "biology"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error: Invalid value for 'topic'"));

    run_ok(&home, &["topic", "add", " physics"]);
    run_ok(&home, &["topic", "use", " history "]);
    let out = run_ok(&home, &["topic", "list"]);
    assert!(out.contains("* history"));
}

#[test]
fn test_focus_toggle() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["focus", "status"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["focused"], true);
    assert_eq!(status["visibility"], "expanded");

    let out = run_ok(&home, &["focus", "toggle"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["focused"], false);
    assert_eq!(status["visibility"], "collapsed");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(&home, &["config", "get", "pomodoro.work_minutes"]).trim(), "25");
    run_ok(&home, &["config", "set", "pomodoro.work_minutes", "50"]);
    assert_eq!(run_ok(&home, &["config", "get", "pomodoro.work_minutes"]).trim(), "50");

    let (_, _, code) = run_cli(&home, &["config", "get", "nope"]);
    assert_ne!(code, 0);
    let (_, stderr, code) = run_cli(&home, &["config", "set", "pomodoro.work_minutes", "many"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_echoes_and_lists_toml() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["config", "set", "log.level", "debug"]);
    assert_eq!(out.trim(), "log.level = debug");

    let out = run_ok(&home, &["config", "list"]);
    assert!(out.contains("[pomodoro]"));
    assert!(out.contains("level = \"debug\""));

    let out = run_ok(&home, &["config", "path"]);
    assert!(out.trim().ends_with("config.toml"));
}

#[test]
fn test_logging_setup_does_not_write_config() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["completions", "zsh"]);
    assert!(!home.path().join("config.toml").exists());
}

#[test]
fn test_unreadable_config_is_reported() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "pomodoro = [").unwrap();
    let (_, stderr, code) = run_cli(&home, &["panel", "get"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("ignoring unreadable configuration"));
}

#[test]
fn test_key_masking() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["key", "set", "  abcd  "]);
    assert_eq!(run_ok(&home, &["key", "show"]).trim(), "••••");
    assert_eq!(run_ok(&home, &["key", "show", "--reveal"]).trim(), "abcd");
    run_ok(&home, &["key", "clear"]);
    assert_eq!(run_ok(&home, &["key", "show"]).trim(), "No API key set.");

    let (_, _, code) = run_cli(&home, &["key", "set", "   "]);
    assert_ne!(code, 0);
}

#[test]
fn test_panel_default_and_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(&home, &["panel", "get"]).trim(), "panel-timer");
    run_ok(&home, &["panel", "set", "panel-sites"]);
    assert_eq!(run_ok(&home, &["panel", "get"]).trim(), "panel-sites");
    let (_, stderr, code) = run_cli(&home, &["panel", "set", "  "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error: Empty input: panel id"));
}

#[test]
fn test_allow_relays_valid_requests_only() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(
        &home,
        &["allow", r#"{"type":"FOCUSMATE_ALLOW","minutes":5}"#, "--domain", "youtube.com"],
    );
    let relayed: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(relayed["type"], "ALLOW_DOMAIN");
    assert_eq!(relayed["minutes"], 5.0);
    assert_eq!(relayed["domain"], "youtube.com");

    for bad in [
        r#"{"type":"FOCUSMATE_ALLOW","minutes":"5"}"#,
        r#"{"type":"OTHER","minutes":5}"#,
        r#"{"type":"FOCUSMATE_ALLOW"}"#,
    ] {
        let (stdout, _, code) = run_cli(&home, &["allow", bad, "--domain", "youtube.com"]);
        assert_ne!(code, 0, "{bad} should be rejected");
        assert!(stdout.is_empty());
    }

    let (_, _, code) = run_cli(
        &home,
        &["allow", r#"{"type":"FOCUSMATE_ALLOW","minutes":5}"#, "--domain", "x.com", "--foreign"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_session_records_screen_time() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(
        &home,
        &[
            "session",
            "--tab-url",
            "https://www.example.com/",
            "--duration-secs",
            "2",
            "--stopwatch",
        ],
    );

    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(events.iter().any(|e| e["type"] == "stopwatch_started"));
    assert!(events.iter().any(|e| e["type"] == "screen_time_sample" && e["hostname"] == "example.com"));

    let out = run_ok(&home, &["screentime", "top", "--json"]);
    let usage: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(usage[0]["hostname"], "example.com");
    assert!(usage[0]["seconds"].as_u64().unwrap() >= 1);

    run_ok(&home, &["screentime", "reset", "example.com"]);
    assert_eq!(run_ok(&home, &["screentime", "show", "www.example.com"]).trim(), "00:00:00");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["completions", "bash"]);
    assert!(out.contains("focusmate"));
}
