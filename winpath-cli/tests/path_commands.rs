//! Tests for the commands that work on path text alone.
//!
//! None of these touch the file system, so they behave the same on every
//! platform.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_classify_text() {
    let env = TestEnv::new();
    let out = env.stdout(&["classify", r"\\server\share\dir\file.txt"]);
    assert!(out.contains("format: unc"), "{out}");
    assert!(out.contains(r"root: \\server\share\"), "{out}");
    assert!(out.contains("relative: false"), "{out}");
}

#[test]
fn test_classify_json() {
    let env = TestEnv::new();
    let value = env.json(&["classify", r"C:\Windows\System32"]);
    assert_eq!(value["path"], r"C:\Windows\System32");
    assert_eq!(value["root"], r"C:\");
    assert_eq!(value["root_length"], 3);
    assert_eq!(value["is_relative"], false);
    assert_eq!(value["is_device"], false);
}

#[test]
fn test_classify_device() {
    let env = TestEnv::new();
    let value = env.json(&["classify", r"\\.\COM1"]);
    assert_eq!(value["is_device"], true);
}

#[test]
fn test_canonicalize_many() {
    let env = TestEnv::new();
    let out = env.stdout(&["canonicalize", r"C:\a\.\b\..\c. ", r"\\server\share\x\..\y"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, [r"C:\a\c", r"\\server\share\y"]);
}

#[test]
fn test_canonicalize_json_is_a_list() {
    let env = TestEnv::new();
    let value = env.json(&["canonicalize", r"C:\x\..\y"]);
    assert_eq!(value, serde_json::json!([r"C:\y"]));
}

#[test]
fn test_canonicalize_requires_a_path() {
    let env = TestEnv::new();
    env.command().arg("canonicalize").assert().failure();
}

#[test]
fn test_extend_short_path_unchanged() {
    let env = TestEnv::new();
    let out = env.stdout(&["extend", r"C:\short"]);
    assert_eq!(out.trim_end(), r"C:\short");
}

#[test]
fn test_extend_force() {
    let env = TestEnv::new();
    let out = env.stdout(&["extend", "--force", r"C:\short"]);
    assert_eq!(out.trim_end(), r"\\?\C:\short");

    let out = env.stdout(&["extend", "--force", r"\\server\share\x"]);
    assert_eq!(out.trim_end(), r"\\?\UNC\server\share\x");
}

#[test]
fn test_unextend() {
    let env = TestEnv::new();
    let out = env.stdout(&["unextend", r"\\?\UNC\server\share\x"]);
    assert_eq!(out.trim_end(), r"\\server\share\x");

    let out = env.stdout(&["unextend", r"\\?\C:\x"]);
    assert_eq!(out.trim_end(), r"C:\x");
}

#[test]
fn test_full_path_relative_to_cwd() {
    let env = TestEnv::new();
    let out = env.stdout(&["full-path", "--cwd", r"C:\Users\dev", r"src\..\notes.txt"]);
    assert_eq!(out.trim_end(), r"C:\Users\dev\notes.txt");
}

#[test]
fn test_full_path_default_cwd_is_c_root() {
    let env = TestEnv::new();
    let out = env.stdout(&["full-path", "notes.txt"]);
    assert_eq!(out.trim_end(), r"C:\notes.txt");
}

#[test]
fn test_full_path_drive_dir() {
    let env = TestEnv::new();
    let out = env.stdout(&[
        "full-path",
        "--cwd",
        r"C:\Users\dev",
        "--drive-dir",
        r"D:=D:\projects",
        "D:app",
    ]);
    assert_eq!(out.trim_end(), r"D:\projects\app");
}

#[test]
fn test_full_path_rooted_uses_cwd_drive() {
    let env = TestEnv::new();
    let out = env.stdout(&["full-path", "--cwd", r"D:\work", r"\top"]);
    assert_eq!(out.trim_end(), r"D:\top");
}

#[test]
fn test_full_path_native_conflicts_with_cwd() {
    let env = TestEnv::new();
    env.command()
        .args(["full-path", "--native", "--cwd", r"C:\", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
