//! CLI smoke tests for sysprobe.
//!
//! These tests run the binary against the live host, so they assume a
//! supported platform with its usual probe utilities on PATH.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the sysprobe binary.
fn sysprobe_cmd() -> Command {
    Command::cargo_bin("sysprobe").unwrap()
}

#[test]
fn help_flag_works() {
    sysprobe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
    sysprobe_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sysprobe"));
}

#[test]
fn prints_all_facts() {
    sysprobe_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("OS Name:"))
        .stdout(predicate::str::contains("OS Version:"))
        .stdout(predicate::str::contains("Architecture:"))
        .stdout(predicate::str::contains("Libc:"));
}

#[test]
fn json_output_is_valid() {
    let output = sysprobe_cmd().arg("--json").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(doc.get("os").is_some());
    assert!(doc.get("version").is_some());
    assert!(doc.get("architecture").is_some());
    assert!(doc.get("compilers").is_some());
}

#[test]
fn rejects_unknown_flags() {
    sysprobe_cmd().arg("--nope").assert().failure();
}
