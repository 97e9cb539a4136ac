//! Tests for error handling, suggestions and exit codes.

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn medtrack(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("medtrack");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg-config"))
        .env_remove("MEDTRACK_STORE")
        .arg("--store")
        .arg(dir.path().join("medications.json"));
    cmd
}

#[test]
fn non_numeric_amount_is_rejected_with_status() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["add", "--name", "Advil", "--dose", "12abc", "--dose-unit", "Tablets"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dose amount must be a number"));

    assert!(!dir.path().join("medications.json").exists());
}

#[test]
fn missing_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["add", "--name", "   ", "--strength", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name is required"))
        .stderr(predicate::str::contains("strength amount must be a number"))
        .stderr(predicate::str::contains("2 invalid field(s)"));
}

#[test]
fn unknown_record_is_not_found() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["show", "6f1c1ad4-5b7c-4c59-9d7e-0c1c4c1e2a10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("medtrack list"));
}

#[test]
fn malformed_id_is_user_error() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["edit", "not-an-id", "--dose", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not-an-id"));
}

#[test]
fn check_reports_invalid_value() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["check", "--numeric", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("input must be a number"));

    medtrack(&dir)
        .args(["check", "--required", ""])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("input is required"));
}

#[test]
fn remove_without_terminal_needs_yes() {
    let dir = TempDir::new().unwrap();
    let out = medtrack(&dir)
        .args(["--output-format", "json", "add", "--name", "Advil"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let record: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let id = record["id"].as_str().unwrap();

    medtrack(&dir)
        .args(["remove", id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("medications.json"), "{ nope").unwrap();
    medtrack(&dir)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a valid medication store"));
}

#[test]
fn explicit_missing_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["--config", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn bad_separator_in_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("medtrack.toml");
    fs::write(&config, "[form]\ndecimal_separator = \"dot\"\n").unwrap();
    medtrack(&dir)
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("single character"));
}

#[test]
fn unknown_subcommand_exits_two() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir).arg("frobnicate").assert().code(2);
}

#[test]
fn bad_reminder_time_exits_two() {
    let dir = TempDir::new().unwrap();
    medtrack(&dir)
        .args(["remind", "6f1c1ad4-5b7c-4c59-9d7e-0c1c4c1e2a10", "--at", "8am"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("HH:MM"));
}
