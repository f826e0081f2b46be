//! Edge cases for `scriptc_driver::compile`/`format_errors` (§7, §9 open
//! question 4).

use scriptc_driver::{compile, format_errors, CompileOptions};

#[test]
fn empty_source_compiles_to_empty_output() {
    let result = compile("", CompileOptions::default());
    assert!(result.success);
    assert_eq!(result.output.unwrap(), "");
}

#[test]
fn unterminated_string_flattens_to_line_one() {
    let result = compile("let x = 1;\nlet y = \"unterminated;", CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 1);
}

#[test]
fn stray_ellipsis_prefix_is_a_lex_error() {
    let result = compile("let x = ..1;", CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn dangling_operator_is_a_parse_error() {
    let result = compile("let x = 1 +;", CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn missing_interface_member_is_reported() {
    let source = r#"
interface Point { x: number; y: number; }
let p: Point = { x: 1 };
"#;
    let result = compile(source, CompileOptions::default());
    assert!(!result.success);
    assert!(!result.errors.is_empty());
}

#[test]
fn format_errors_handles_multiple_diagnostics_in_order() {
    let source = "let a: number = \"x\";\nlet b: number = \"y\";\n";
    let result = compile(source, CompileOptions::default());
    let text = format_errors(&result.errors, Some(source));
    let first = text.find("line 1").unwrap();
    let second = text.find("line 2").unwrap();
    assert!(first < second);
}

#[test]
fn format_errors_empty_list_is_empty_text() {
    assert_eq!(format_errors(&[], None), "");
}

#[test]
fn include_tokens_without_include_ast() {
    let result = compile(
        "let x = 1;",
        CompileOptions { include_tokens: true, include_ast: false, ..Default::default() },
    );
    assert!(result.tokens.is_some());
    assert!(result.ast.is_none());
}
