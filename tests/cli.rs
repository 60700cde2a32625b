// ABOUTME: Integration tests for the dockhand CLI commands.
// ABOUTME: Validates --help output, the action catalogue, and init behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn dockhand_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dockhand"))
}

#[test]
fn help_shows_commands() {
    dockhand_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("hook"))
        .stdout(predicate::str::contains("cp"));
}

#[test]
fn actions_lists_catalogue() {
    dockhand_cmd()
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("application-pre-start"))
        .stdout(predicate::str::contains(
            "/opt/cloudunit/scripts/add-user.sh CU_USER CU_PASSWORD",
        ));
}

#[test]
fn actions_as_json_lines() {
    dockhand_cmd()
        .args(["--json", "actions"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"event":"result","key":"gather-environment","value":"/opt/cloudunit/scripts/env.sh"}"#,
        ));
}

#[test]
fn unknown_hook_is_rejected_before_connecting() {
    dockhand_cmd()
        .args(["hook", "web", "reboot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown lifecycle action"));
}

#[test]
fn invalid_container_name_is_rejected() {
    dockhand_cmd()
        .args(["stop", "-web"])
        .assert()
        .failure();
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("dockhand.yml");

    dockhand_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "dockhand.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(
        content.contains("privileged_user:"),
        "Config should have privileged_user field"
    );
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("dockhand.yml");

    fs::write(&config_path, "controller: {}").unwrap();

    dockhand_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_explicit_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    dockhand_cmd()
        .current_dir(temp_dir.path())
        .args(["--config", "nope.yml", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}
