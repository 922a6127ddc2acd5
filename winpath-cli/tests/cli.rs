//! Tests for argument parsing, help and version output.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_no_arguments_prints_usage() {
    let env = TestEnv::new();
    env.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("winpath"));
}

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("canonical-root"))
        .stdout(predicate::str::contains("dos-devices"));
}

#[test]
fn test_subcommand_help() {
    let env = TestEnv::new();
    env.command()
        .args(["full-path", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--drive-dir"))
        .stdout(predicate::str::contains("--native"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let env = TestEnv::new();
    env.command()
        .arg("reserve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command()
        .args(["--quiet", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("winpath"));
}
