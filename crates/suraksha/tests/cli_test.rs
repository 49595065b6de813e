//! Integration tests for the `suraksha` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! list filtering and error handling against the built-in deployment records.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `suraksha` binary with env isolation.
///
/// Clears the `SURAKSHA_*` env vars the CLI reads and points home and
/// config directories at `home` so tests never touch the user's real
/// configuration.
fn suraksha_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("suraksha");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SURAKSHA_OUTPUT")
        .env_remove("SURAKSHA_COLOR")
        .env_remove("SURAKSHA_CONFIG");
    cmd
}

/// A command with `--config` pointing into a fresh temp directory.
fn isolated() -> (TempDir, PathBuf, assert_cmd::Command) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let mut cmd = suraksha_cmd(dir.path());
    cmd.arg("--config").arg(&config);
    (dir, config, cmd)
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    let output = suraksha_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    suraksha_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("pole-safety")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("incidents"))
            .and(predicate::str::contains("citizen"))
            .and(predicate::str::contains("analytics")),
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    suraksha_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("suraksha"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    suraksha_cmd(dir.path()).arg("poles").assert().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    suraksha_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_devices_search_matches_location_case_insensitively() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "list", "--search", "ernakulam", "-o", "plain"])
        .assert()
        .success()
        .stdout("KL-003-KCH\n");
}

#[test]
fn test_devices_status_filter() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "list", "--status", "healthy", "-o", "plain"])
        .assert()
        .success()
        .stdout("KL-001-TVM\nKL-005-TSR\n");
}

#[test]
fn test_devices_search_and_status_combine() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args([
        "devices", "list", "--search", "kochi", "--status", "warning", "-o", "plain",
    ])
    .assert()
    .success()
    .stdout("KL-002-KCH\n");
}

#[test]
fn test_devices_empty_table_says_so() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "list", "--search", "no such pole"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No devices found"));
}

#[test]
fn test_devices_empty_json_is_empty_array() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "list", "--search", "no such pole", "-o", "json-compact"])
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("No devices found").not());
}

#[test]
fn test_devices_invalid_status_is_validation_error() {
    let (_dir, _config, mut cmd) = isolated();
    let output = cmd
        .args(["devices", "list", "--status", "sparking"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let text = combined_output(&output);
    assert!(text.contains("healthy"), "Expected accepted values in:\n{text}");
}

#[test]
fn test_devices_counts_are_zero_filled() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "counts", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(concat!(
            r#"[{"status":"healthy","count":2},{"status":"warning","count":1},"#,
            r#"{"status":"critical","count":1},{"status":"offline","count":1}]"#,
            "\n"
        ));
}

#[test]
fn test_devices_get_by_pole_id() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["devices", "get", "kl-004-klm"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Calicut Beach Road")
                .and(predicate::str::contains("battery low")),
        );
}

#[test]
fn test_devices_get_unknown_is_not_found() {
    let (_dir, _config, mut cmd) = isolated();
    let output = cmd.args(["devices", "get", "KL-999-XXX"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("devices list"), "Expected list hint in:\n{text}");
}

// ── Live telemetry ──────────────────────────────────────────────────

#[test]
fn test_live_alerts_lists_critical_and_warning() {
    let (_dir, _config, mut cmd) = isolated();
    let output = cmd.args(["live", "alerts", "-o", "plain"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.trim().is_empty());
    assert!(stdout.contains("KL-007-KLM"), "Expected KL-007-KLM in:\n{stdout}");
}

// ── Incidents ───────────────────────────────────────────────────────

#[test]
fn test_incidents_resolved_tab_is_empty() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["incidents", "list", "--tab", "resolved"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No incidents found"));
}

#[test]
fn test_incidents_active_tab_search() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["incidents", "list", "--search", "KL-007", "-o", "plain"])
        .assert()
        .success()
        .stdout("INC-2024-002\n");
}

#[test]
fn test_incidents_comment_appends_to_action_log() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args([
        "incidents", "comment", "INC-2024-001", "Crew on site", "--user", "Anita",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("Action log for INC-2024-001")
            .and(predicate::str::contains("Anita commented: Crew on site")),
    );
}

#[test]
fn test_incidents_blank_comment_is_rejected() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["incidents", "comment", "INC-2024-001", "   "])
        .assert()
        .code(5);
}

// ── Field jobs ──────────────────────────────────────────────────────

#[test]
fn test_jobs_navigate_prints_directions_url() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["jobs", "navigate", "JOB001", "-o", "plain"])
        .assert()
        .success()
        .stdout("https://www.google.com/maps/dir/?api=1&destination=9.9312,76.2673\n");
}

#[test]
fn test_jobs_status_accepts_hyphenated_form() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["jobs", "list", "--status", "in-progress", "-o", "plain"])
        .assert()
        .success()
        .stdout("JOB002\n");
}

// ── Citizen reports ─────────────────────────────────────────────────

#[test]
fn test_citizen_submit_with_location() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args([
        "citizen", "submit", "--title", "Sparking wire", "--location", "Market Road",
        "--photo", "/tmp/pics/wire.jpg", "-o", "json",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains(r#""status": "submitted""#)
            .and(predicate::str::contains(r#""priority": "medium""#))
            .and(predicate::str::contains("wire.jpg"))
            .and(predicate::str::contains("/tmp/pics").not()),
    );
}

#[test]
fn test_citizen_submit_here_without_position_fails() {
    let (_dir, _config, mut cmd) = isolated();
    let output = cmd
        .args(["citizen", "submit", "--title", "Leaning pole", "--here"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let text = combined_output(&output);
    assert!(text.contains("location.lat"), "Expected config hint in:\n{text}");
}

#[test]
fn test_citizen_submit_here_uses_configured_position() {
    let (dir, config, _) = isolated();
    std::fs::write(&config, "[location]\nlat = 9.9312\nlng = 76.2673\n").unwrap();
    suraksha_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["citizen", "submit", "--title", "Leaning pole", "--here", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9.931200, 76.267300"));
}

#[test]
fn test_citizen_submit_requires_a_location_source() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["citizen", "submit", "--title", "Leaning pole"])
        .assert()
        .code(2);
}

// ── Reports ─────────────────────────────────────────────────────────

#[test]
fn test_reports_generate_summarises_tallies() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args([
        "reports", "generate", "incident_summary", "--range", "last_7_days", "-o", "json",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains(r#""range": "last_7_days""#)
            .and(predicate::str::contains(r#""active": 3"#)),
    );
}

#[test]
fn test_reports_generate_unknown_template() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["reports", "generate", "weather"]).assert().code(4);
}

// ── Analytics ───────────────────────────────────────────────────────

#[test]
fn test_analytics_predictions_filter_by_band() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["analytics", "predictions", "--band", "high", "-o", "plain"])
        .assert()
        .success()
        .stdout("KL-008-KLM\nKL-015-TSR\n");
}

#[test]
fn test_analytics_predictions_invalid_band_is_validation_error() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["analytics", "predictions", "--band", "extreme"])
        .assert()
        .code(5);
}

#[test]
fn test_analytics_prediction_shows_reasons() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["analytics", "prediction", "kl-015-tsr"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Irregular voltage patterns")
                .and(predicate::str::contains("74% (high)")),
        );
}

#[test]
fn test_analytics_prediction_unknown_pole_is_not_found() {
    let (_dir, _config, mut cmd) = isolated();
    let output = cmd
        .args(["analytics", "prediction", "KL-001-TVM"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("analytics predictions"), "Expected list hint in:\n{text}");
}

#[test]
fn test_analytics_metrics_json() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["analytics", "metrics", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""accuracy": 94.2"#)
                .and(predicate::str::contains(r#""high": 88"#)),
        );
}

// ── Users and integrations ──────────────────────────────────────────

#[test]
fn test_users_filter_by_role() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["users", "list", "--status", "safety_inspector", "-o", "plain"])
        .assert()
        .success()
        .stdout("amit@ksebl.in\n");
}

#[test]
fn test_integrations_list() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["integrations", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("ksebl_portal\nwhatsapp\ngoogle_maps\nweather\n");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    let (_dir, config, mut cmd) = isolated();
    cmd.args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let (dir, config, mut cmd) = isolated();
    cmd.args(["config", "init"]).assert().success();
    assert!(config.exists());

    suraksha_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .code(6);
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let (_dir, _config, mut cmd) = isolated();
    cmd.args(["config", "set", "live.speed", "9"]).assert().code(6);
}

#[test]
fn test_config_default_output_applies() {
    let (dir, config, mut cmd) = isolated();
    cmd.args(["config", "set", "defaults.output", "plain"])
        .assert()
        .success();

    suraksha_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["devices", "list", "--status", "offline"])
        .assert()
        .success()
        .stdout("KL-004-KLM\n");
}
