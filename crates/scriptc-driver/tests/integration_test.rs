//! Library-level integration tests: the six concrete scenarios from §8,
//! exercised through `scriptc_driver::compile` directly (no subprocess).

use scriptc_driver::{compile, CompileOptions};

#[test]
fn scenario_1_numeric_literal_widens_to_annotation() {
    let result = compile("let x: number = 42;", CompileOptions::default());
    assert!(result.success);
    assert_eq!(result.output.unwrap().trim(), "let x = 42;");
}

#[test]
fn scenario_2_string_not_assignable_to_number() {
    let result = compile(r#"let x: number = "hello";"#, CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("not assignable"));
}

#[test]
fn scenario_3_interface_and_function_erase_to_plain_js() {
    let source = r#"
interface Person { name: string; age: number; }
function createPerson(name: string, age: number): Person { return { name: name, age: age }; }
let alice: Person = createPerson("Alice", 30);
"#;
    let result = compile(source, CompileOptions::default());
    assert!(result.success);
    let output = result.output.unwrap();
    assert!(output.contains("// interface Person removed"));
    assert!(output.contains("function createPerson(name, age)"));
    assert!(output.contains(r#"let alice = createPerson("Alice", 30);"#));
}

#[test]
fn scenario_4_enum_lowers_to_runtime_object() {
    let result = compile("enum Color { Red, Green, Blue }", CompileOptions::default());
    assert!(result.success);
    let output = result.output.unwrap();
    assert!(output.contains("var Color;"));
    assert!(output.contains(r#"Color[Color["Red"] = 0] = "Red";"#));
    assert!(output.contains(r#"Color[Color["Green"] = 1] = "Green";"#));
    assert!(output.contains(r#"Color[Color["Blue"] = 2] = "Blue";"#));
}

#[test]
fn scenario_5_too_few_arguments() {
    let source = "function add(a: number, b: number): number { return a + b; }\nadd(1);";
    let result = compile(source, CompileOptions::default());
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e.message.contains("arguments, but got 1")));
}

#[test]
fn scenario_6_redeclaration_in_same_scope() {
    let result = compile(
        "let x: number = 1; let x: number = 2;",
        CompileOptions::default(),
    );
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e.message.contains("already declared")));
}

#[test]
fn skip_type_check_ignores_all_diagnostics() {
    let source = "let x: number = 1; let x: number = 2;";
    let result = compile(source, CompileOptions { skip_type_check: true, ..Default::default() });
    assert!(result.success);
    assert!(result.errors.is_empty());
}

#[test]
fn diagnostics_are_in_nondecreasing_line_order() {
    let source = "\
let a: number = \"one\";
let b: number = \"two\";
let c: number = \"three\";
";
    let result = compile(source, CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.errors.len(), 3);
    let lines: Vec<u32> = result.errors.iter().map(|e| e.line).collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}
