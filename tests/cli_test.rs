//! Integration tests for the asmago binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SHORTCUTS: &str = r#"{
  "dev;i-0abc;Start Session (SSM);": {
    "profile": "dev",
    "instance_id": "i-0abc",
    "instance_name": "dev-web-1",
    "action": "SessionStart",
    "usage_count": 3
  },
  "qa;i-0def;Connect RDS;orders|qa|read": {
    "profile": "qa",
    "instance_id": "i-0def",
    "instance_name": "qa-api",
    "action": "PortForward",
    "target": {"key": "orders", "env": "qa", "type": "read"},
    "usage_count": 1
  }
}"#;

/// A command with its data and config directories inside `temp`.
fn asmago(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("asmago"));
    cmd.env("ASMAGO_DATA_DIR", temp.path().join("data"))
        .env("ASMAGO_CONFIG_DIR", temp.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SSM session"))
        .stdout(predicate::str::contains("--dry-run"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp).arg("frobnicate").assert().failure();
    Ok(())
}

#[test]
fn shortcuts_empty() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp)
        .arg("shortcuts")
        .assert()
        .success()
        .stdout(predicate::str::contains("No shortcuts yet"));
    Ok(())
}

#[test]
fn shortcuts_lists_by_usage() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("shortcuts.json"), SHORTCUTS)?;

    asmago(&temp)
        .arg("sc")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. dev -> dev-web-1 -> Start Session (SSM) [3x]",
        ))
        .stdout(predicate::str::contains(
            "2. qa -> qa-api -> Connect RDS (orders) [1x]",
        ));
    Ok(())
}

#[test]
fn shortcuts_pins_last_used() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("shortcuts.json"), SHORTCUTS)?;
    fs::write(
        data.join("last_shortcut.txt"),
        "qa;i-0def;Connect RDS;orders|qa|read",
    )?;

    asmago(&temp)
        .arg("shortcuts")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. qa -> qa-api -> Connect RDS (orders) (last used)",
        ));
    Ok(())
}

#[test]
fn corrupt_shortcuts_suggest_clean() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("shortcuts.json"), "{oops")?;

    asmago(&temp)
        .arg("shortcuts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("asmago clean"));
    Ok(())
}

#[test]
fn clean_missing_dir_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp)
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Data directory not found, nothing to clean.",
        ));
    Ok(())
}

#[test]
fn clean_without_confirmation_keeps_data() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("shortcuts.json"), SHORTCUTS)?;

    // Not a terminal: the confirmation falls back to its "no" default.
    asmago(&temp)
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Process aborted by user."));
    assert!(data.join("shortcuts.json").exists());
    Ok(())
}

#[test]
fn clean_force_removes_data() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("shortcuts.json"), SHORTCUTS)?;

    asmago(&temp).args(["clean", "--force"]).assert().success();
    assert!(!data.exists());
    Ok(())
}

#[test]
fn clean_confirmed_by_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data = temp.path().join("data");
    fs::create_dir_all(&data)?;

    asmago(&temp)
        .arg("clean")
        .env("ASMAGO_PROMPT_CONFIRM_CLEAN", "yes")
        .assert()
        .success();
    assert!(!data.exists());
    Ok(())
}

#[test]
fn interactive_requires_aws() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = temp.path().join("bin");
    fs::create_dir_all(&empty_path)?;

    asmago(&temp)
        .env("PATH", &empty_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency 'aws' not found"));
    Ok(())
}

#[test]
fn refresh_requires_profile() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp).arg("refresh").assert().failure();
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    asmago(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_asmago"));
    Ok(())
}
