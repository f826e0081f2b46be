//! Full-pipeline compilation scenarios driven through the CLI binary.

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
fn hello_world_compiles_clean() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("hello.js");

    scriptc_bin()
        .arg(fixtures_dir().join("hello_world.ts"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let output = std::fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("function greet(name)"));
    assert!(!output.contains(": string"));
}

#[test]
fn arithmetic_compiles_and_erases_types() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("arithmetic.js");

    scriptc_bin()
        .arg(fixtures_dir().join("arithmetic.ts"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let output = std::fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("function add(a, b)"));
    assert!(!output.contains(": number"));
}

#[test]
fn interface_lowers_to_comment_and_strips_annotations() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("person.js");

    scriptc_bin()
        .arg(fixtures_dir().join("interface_person.ts"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let output = std::fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("// interface Person removed"));
    assert!(output.contains("function createPerson(name, age)"));
    assert!(output.contains(r#"let alice = createPerson("Alice", 30);"#));
}

#[test]
fn enum_lowers_to_runtime_object() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("color.js");

    scriptc_bin()
        .arg(fixtures_dir().join("enum_example.ts"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let output = std::fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("var Color;"));
    assert!(output.contains(r#"Color[Color["Red"] = 0] = "Red";"#));
    assert!(output.contains(r#"Color[Color["Green"] = 1] = "Green";"#));
    assert!(output.contains(r#"Color[Color["Blue"] = 2] = "Blue";"#));
}

#[test]
fn type_error_reports_and_produces_no_output() {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("should_not_exist.js");

    scriptc_bin()
        .arg(fixtures_dir().join("type_error.ts"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error (line 1):"));

    assert!(!output_path.exists());
}
