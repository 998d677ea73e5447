//! CLI binary tests
//!
//! HOME points at an empty temp dir so no user config leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, V1_OUTPUT, V2_OUTPUT};

fn castmirror(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("castmirror").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn fixtures_arg() -> String {
    fixtures_dir().to_string_lossy().to_string()
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("meta"));
}

#[test]
fn play_file_writes_output() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["play", &fixtures_dir().join("1.cast").to_string_lossy()])
        .assert()
        .success()
        .stdout(V1_OUTPUT);
}

#[test]
fn play_id_from_directory() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["play", "2", "--dir", &fixtures_arg()])
        .assert()
        .success()
        .stdout(V2_OUTPUT);
}

#[test]
fn play_unknown_id_fails() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["play", "404", "--dir", &fixtures_arg()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn play_empty_recording_fails() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["play", "3", "--dir", &fixtures_arg()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no output"));
}

#[test]
fn meta_prints_json_without_frames() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["meta", "1", "--dir", &fixtures_arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"hello v1\""))
        .stdout(predicate::str::contains("\"width\": 80"))
        .stdout(predicate::str::contains("stdout").not());
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    castmirror(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port = 1965"))
        .stdout(predicate::str::contains("frame_interval_ms = 100"));
}

#[test]
fn explicit_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "[server]\nport = 7000\n").unwrap();

    castmirror(&home)
        .args(["config", "show", "--config", &path.to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("port = 7000"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "[playback]\nframe_interval_ms = 0\n").unwrap();

    castmirror(&home)
        .args(["config", "show", "--config", &path.to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
