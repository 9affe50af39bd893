//! Integration tests for the termreel binary

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::fixture;

/// Command for the binary with an isolated settings file.
fn termreel(settings_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("termreel").expect("Failed to find termreel binary");
    cmd.env("TERMREEL_CONFIG", settings_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

/// Run with args and capture (stdout, stderr, exit code)
fn run(args: &[&str]) -> (String, String, i32) {
    let settings_dir = TempDir::new().unwrap();
    let output = termreel(&settings_dir)
        .args(args)
        .output()
        .expect("Failed to execute termreel");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn demo() -> String {
    fixture("demo.yml").display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run(&["--help"]);

    assert_eq!(exit_code, 0);
    for sub in ["play", "info", "timeline", "config", "completions"] {
        assert!(stdout.contains(sub), "missing {sub} in help:\n{stdout}");
    }
}

#[test]
fn play_help_shows_pacing_flags() {
    let (stdout, _stderr, exit_code) = run(&["play", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<FILE>"));
    assert!(stdout.contains("--real-timing"));
    assert!(stdout.contains("--speed-factor"));
    assert!(stdout.contains("--repeat"));
}

#[test]
fn play_without_file_is_usage_error() {
    let (_stdout, stderr, exit_code) = run(&["play"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}

// ============================================================================
// Timeline
// ============================================================================

#[test]
fn timeline_prints_clamped_offsets() {
    let (stdout, stderr, exit_code) = run(&["timeline", &demo()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    insta::assert_snapshot!(stdout, @r#"
    120      "\u001b[1;32m$\u001b[0m "
    2120     "ls\r\n"
    2200     "README.md  demo.yml\r\n"
    "#);
}

#[test]
fn timeline_real_timing_keeps_recorded_delays() {
    let (stdout, _stderr, exit_code) = run(&["timeline", &demo(), "--real-timing"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.lines().any(|l| l.starts_with("5120 ")));
}

#[test]
fn timeline_json_with_limit() {
    let (stdout, _stderr, exit_code) =
        run(&["timeline", &demo(), "--json", "--repeat", "0", "--limit", "4"]);

    assert_eq!(exit_code, 0);
    let chunks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let offsets: Vec<u64> = chunks
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["offset_ms"].as_u64().unwrap())
        .collect();
    assert_eq!(offsets, vec![120, 2120, 2200, 2320]);
    assert_eq!(chunks[1]["content"], "ls\r\n");
}

#[test]
fn endless_timeline_requires_limit() {
    let settings_dir = TempDir::new().unwrap();
    termreel(&settings_dir)
        .args(["timeline", &demo(), "--repeat", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--limit"));
}

// ============================================================================
// Info
// ============================================================================

#[test]
fn info_summarizes_demo() {
    let settings_dir = TempDir::new().unwrap();
    termreel(&settings_dir)
        .args(["info", &demo()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Size:        80x24"))
        .stdout(predicate::str::contains("Records:     3"))
        .stdout(predicate::str::contains("Content:     38 B"))
        .stdout(predicate::str::contains("Duration:    2.2s"))
        .stdout(predicate::str::contains("Repeat:      2 times"))
        .stdout(predicate::str::contains("theme"));
}

// ============================================================================
// Play
// ============================================================================

#[test]
fn play_writes_content_verbatim() {
    let settings_dir = TempDir::new().unwrap();
    termreel(&settings_dir)
        .args(["play", &demo(), "--speed-factor", "0"])
        .assert()
        .success()
        .stdout("\x1b[1;32m$\x1b[0m ls\r\nREADME.md  demo.yml\r\n");
}

#[test]
fn play_honours_settings_file() {
    let settings_dir = TempDir::new().unwrap();
    std::fs::write(
        settings_dir.path().join("config.toml"),
        "[playback]\nspeed_factor = 0.0\n",
    )
    .unwrap();

    termreel(&settings_dir)
        .args(["play", &demo(), "--repeat", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md").count(2));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn missing_records_reports_parse_error() {
    let path = fixture("missing_records.yml").display().to_string();
    let (_stdout, stderr, exit_code) = run(&["info", &path]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Missing required key `records`"), "stderr: {stderr}");
}

#[test]
fn negative_delay_reports_record_index() {
    let path = fixture("negative_delay.yml").display().to_string();
    let (_stdout, stderr, exit_code) = run(&["timeline", &path]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Record 1"), "stderr: {stderr}");
    assert!(stderr.contains("-250"));
}

#[test]
fn missing_file_reports_path() {
    let (_stdout, stderr, exit_code) = run(&["info", "/nonexistent/session.yml"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("/nonexistent/session.yml"));
}

// ============================================================================
// Config / completions
// ============================================================================

#[test]
fn config_path_uses_override() {
    let settings_dir = TempDir::new().unwrap();
    let expected = settings_dir.path().join("config.toml");
    termreel(&settings_dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"));
    assert!(stdout.contains("speed_factor = 1.0"));
}

#[test]
fn completions_for_bash() {
    let (stdout, _stderr, exit_code) = run(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("termreel"));
}
