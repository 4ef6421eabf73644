//! Integration tests for the `dynval` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the inspect, get
//! and calc subcommands through the actual binary, including stdin piping,
//! file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

fn dynval() -> Command {
    Command::cargo_bin("dynval").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// inspect
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inspect_stdin_prints_kind_per_node() {
    dynval()
        .arg("inspect")
        .write_stdin(r#"{"name":"Alice","scores":[95,87.5]}"#)
        .assert()
        .success()
        .stdout("$: Map\n$.name: String\n$.scores: List\n$.scores[0]: Int\n$.scores[1]: Double\n");
}

#[test]
fn inspect_file() {
    dynval()
        .args(["inspect", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("$.active: Bool"))
        .stdout(predicate::str::contains("$.projects[1].title: String"))
        .stdout(predicate::str::contains("$.ratio: Double"));
}

#[test]
fn inspect_rejects_null() {
    dynval()
        .arg("inspect")
        .write_stdin(r#"{"a":null}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported JSON value"));
}

#[test]
fn inspect_rejects_invalid_json() {
    dynval()
        .arg("inspect")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn inspect_missing_file_fails() {
    dynval()
        .args(["inspect", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// get
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_nested_path() {
    dynval()
        .args(["get", "projects.1.title", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("\"Gateway\"\n");
}

#[test]
fn get_subtree_as_json() {
    let output = dynval()
        .args(["get", "tags", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, serde_json::json!(["admin", "ops"]));
}

#[test]
fn get_root() {
    dynval()
        .args(["get", "$"])
        .write_stdin("[1,2]")
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn get_missing_key_reports_key_not_found() {
    dynval()
        .args(["get", "missing", "-i", sample_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found"));
}

#[test]
fn get_index_out_of_range() {
    dynval()
        .args(["get", "tags.5", "-i", sample_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn get_writes_output_file() {
    let dir = std::env::temp_dir().join(format!("dynval-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("age.json");

    dynval()
        .args(["get", "age", "-i", sample_json_path(), "-o"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "30");
    std::fs::remove_dir_all(&dir).unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// calc
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn calc_int_addition() {
    dynval()
        .args(["calc", "1", "+", "2"])
        .assert()
        .success()
        .stdout("Int 3\n");
}

#[test]
fn calc_mixed_widens_to_float() {
    dynval()
        .args(["calc", "1", "+", "2.5"])
        .assert()
        .success()
        .stdout("Float 3.5\n");
}

#[test]
fn calc_string_concatenation() {
    dynval()
        .args(["calc", "1", "+", "x"])
        .assert()
        .success()
        .stdout("String 1x\n");
}

#[test]
fn calc_negative_operand() {
    dynval()
        .args(["calc", "-7", "/", "2"])
        .assert()
        .success()
        .stdout("Int -3\n");
}

#[test]
fn calc_remainder() {
    dynval()
        .args(["calc", "5", "%", "4"])
        .assert()
        .success()
        .stdout("Int 1\n");
}

#[test]
fn calc_float_remainder_is_incompatible() {
    dynval()
        .args(["calc", "5.0", "%", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incompatible types"));
}

#[test]
fn calc_int_division_by_zero() {
    dynval()
        .args(["calc", "1", "/", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn calc_equality_respects_tags() {
    dynval()
        .args(["calc", "1", "==", "1.0"])
        .assert()
        .success()
        .stdout("Bool false\n");

    dynval()
        .args(["calc", "1", "!=", "2"])
        .assert()
        .success()
        .stdout("Bool true\n");
}

#[test]
fn calc_unknown_operator() {
    dynval()
        .args(["calc", "1", "^", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operator"));
}
