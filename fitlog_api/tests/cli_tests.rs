//! Binary-level tests for the fitlog server executable.
//!
//! Anything that binds the listener cannot run here, so these cover the
//! argument surface and startup failure paths.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("fitlog").expect("Failed to find fitlog binary")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise tracking API server"))
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    cli()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_missing_config_file_fails_startup() {
    cli()
        .arg("--config")
        .arg("/nonexistent/fitlog/config.toml")
        .assert()
        .failure();
}
