//! Output-shape snapshots: pins the exact text the emitter produces for a
//! handful of fixtures so a regression in indentation or lowering shows up
//! as a diff instead of a vague assertion failure.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("e2e")
        .join("fixtures")
}

fn compile_to_string(fixture: &str) -> String {
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("out.js");

    Command::new(env!("CARGO_BIN_EXE_scriptc"))
        .arg(fixtures_dir().join(fixture))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    std::fs::read_to_string(&output_path).unwrap()
}

#[test]
fn enum_snapshot() {
    let output = compile_to_string("enum_example.ts");
    assert_eq!(
        output,
        "var Color;\n\
         (function (Color) {\n\
         \u{20}\u{20}Color[Color[\"Red\"] = 0] = \"Red\";\n\
         \u{20}\u{20}Color[Color[\"Green\"] = 1] = \"Green\";\n\
         \u{20}\u{20}Color[Color[\"Blue\"] = 2] = \"Blue\";\n\
         })(Color || (Color = {}));\n\
         let favorite = Color.Green;\n"
    );
}
