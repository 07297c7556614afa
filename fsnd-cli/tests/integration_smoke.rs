//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn fsnd() -> Command {
    let mut cmd = Command::cargo_bin("fsnd").unwrap();
    // Keep the developer's own config file out of the picture
    cmd.env_remove("FSND_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    fsnd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    fsnd()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_rejects_unknown_app() {
    fsnd()
        .arg("serve")
        .arg("blog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_seed_only_knows_trivia() {
    fsnd()
        .arg("seed")
        .arg("fyyur")
        .assert()
        .failure()
        .stderr(predicate::str::contains("trivia"));
}

#[test]
fn test_completions_bash() {
    fsnd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsnd"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    fsnd()
        .arg("--config")
        .arg(&missing)
        .arg("migrate")
        .arg("trivia")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[trivia]\nquestions_per_page = \"many\"\n").unwrap();

    fsnd()
        .arg("--config")
        .arg(&path)
        .arg("migrate")
        .arg("trivia")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn test_bad_bind_env_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    fsnd()
        .env("FSND_BIND", "not-an-address")
        .arg("--config")
        .arg(&path)
        .arg("serve")
        .arg("trivia")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FSND_BIND"));
}
