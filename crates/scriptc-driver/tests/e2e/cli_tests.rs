//! CLI interface tests: help/version output, default and explicit output
//! paths, `--skip-type-check`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("e2e")
        .join("fixtures")
}

fn scriptc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scriptc"))
}

#[test]
fn help_output() {
    scriptc_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_output() {
    scriptc_bin().arg("--version").assert().success();
}

#[test]
fn compiles_to_explicit_output() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("hello.js");
    let input_path = fixtures_dir().join("hello_world.ts");

    scriptc_bin()
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists());
}

#[test]
fn compiles_to_default_output_path() {
    let temp = TempDir::new().unwrap();
    let input_path = temp.path().join("program.ts");
    std::fs::copy(fixtures_dir().join("arithmetic.ts"), &input_path).unwrap();

    scriptc_bin().arg(&input_path).assert().success();

    assert!(temp.path().join("program.js").exists());
}

#[test]
fn skip_type_check_succeeds_on_type_error() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("out.js");
    let input_path = fixtures_dir().join("type_error.ts");

    scriptc_bin()
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--skip-type-check")
        .assert()
        .success();

    assert!(output_path.exists());
}

#[test]
fn type_error_without_skip_exits_nonzero() {
    let input_path = fixtures_dir().join("type_error.ts");

    scriptc_bin()
        .arg(&input_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not assignable"));
}

#[test]
fn missing_input_file_exits_nonzero() {
    scriptc_bin()
        .arg("does-not-exist.ts")
        .assert()
        .failure();
}
