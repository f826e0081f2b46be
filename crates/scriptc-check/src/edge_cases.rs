//! Edge case tests for scriptc-check

use crate::check;
use scriptc_parse::parse;
use scriptc_util::Severity;

fn diagnostics(source: &str) -> Vec<scriptc_util::Diagnostic> {
    let tokens = scriptc_lex::tokenize(source).expect("source should lex");
    let program = parse(tokens).expect("source should parse");
    check(&program)
}

fn errors(source: &str) -> usize {
    diagnostics(source).iter().filter(|d| d.severity == Severity::Error).count()
}

// ==================== ASSIGNABILITY ====================

/// EDGE CASE: mismatched literal initializer is a diagnostic
#[test]
fn test_edge_literal_mismatch() {
    assert_eq!(errors("let x: number = \"hi\";"), 1);
}

/// EDGE CASE: widened literal still satisfies the declared primitive
#[test]
fn test_edge_literal_widens() {
    assert_eq!(errors("let x: number = 1;"), 0);
}

/// EDGE CASE: bare string assignable to a union of string literals
#[test]
fn test_edge_string_union_relaxation() {
    assert_eq!(errors("let mode: \"a\" | \"b\";\nlet s: string = \"a\";\nmode = s;"), 0);
}

/// EDGE CASE: any absorbs a mismatched assignment
#[test]
fn test_edge_any_absorbs() {
    assert_eq!(errors("let x: any = \"hi\"; let y: number = x;"), 0);
}

// ==================== CALL ARITY ====================

/// EDGE CASE: too few arguments at a call site
#[test]
fn test_edge_too_few_arguments() {
    assert_eq!(errors("function f(a: number, b: number): number { return a + b; }\nf(1);"), 1);
}

/// EDGE CASE: too many arguments at a call site
#[test]
fn test_edge_too_many_arguments() {
    assert_eq!(errors("function f(a: number): number { return a; }\nf(1, 2);"), 1);
}

/// EDGE CASE: optional parameter may be omitted
#[test]
fn test_edge_optional_parameter_omitted() {
    assert_eq!(errors("function f(a: number, b?: number): number { return a; }\nf(1);"), 0);
}

/// EDGE CASE: rest parameter accepts any trailing count
#[test]
fn test_edge_rest_parameter_accepts_many() {
    assert_eq!(errors("function f(...xs: number[]): number { return 0; }\nf(1, 2, 3, 4);"), 0);
}

// ==================== SCOPE ====================

/// EDGE CASE: redeclaration in the same block is a diagnostic
#[test]
fn test_edge_redeclaration_same_block() {
    assert_eq!(errors("let x = 1;\nlet x = 2;"), 1);
}

/// EDGE CASE: shadowing in a nested block is allowed
#[test]
fn test_edge_shadowing_nested_block_allowed() {
    assert_eq!(errors("let x = 1;\n{ let x = \"hi\"; }"), 0);
}

/// EDGE CASE: undefined name is a diagnostic
#[test]
fn test_edge_undefined_name() {
    assert_eq!(errors("missingName;"), 1);
}

/// EDGE CASE: function body resolves globals, not its lexical enclosure
#[test]
fn test_edge_function_body_reparents_to_global() {
    let source = "let outer = 1;\nfunction f(): number {\n  return outer;\n}";
    assert_eq!(errors(source), 0);
}

// ==================== INTERFACES AND CLASSES ====================

/// EDGE CASE: missing required interface member
#[test]
fn test_edge_missing_interface_member() {
    let source = "interface Point { x: number; y: number; }\nlet p: Point = { x: 1 };";
    assert_eq!(errors(source), 1);
}

/// EDGE CASE: optional interface member may be omitted
#[test]
fn test_edge_optional_interface_member_omitted() {
    let source = "interface Point { x: number; y?: number; }\nlet p: Point = { x: 1 };";
    assert_eq!(errors(source), 0);
}

/// EDGE CASE: subclass inherits superclass instance members
#[test]
fn test_edge_subclass_inherits_members() {
    let source = "class Animal { name: string = \"\"; }\nclass Dog extends Animal { bark(): void {} }\nlet d: Dog = new Dog();\nd.name;";
    assert_eq!(errors(source), 0);
}

/// EDGE CASE: unknown member access on a known interface shape
#[test]
fn test_edge_unknown_member_access() {
    let source = "interface Point { x: number; }\nlet p: Point = { x: 1 };\np.z;";
    assert_eq!(errors(source), 1);
}

// ==================== ENUMS ====================

/// EDGE CASE: enum member access is well-typed
#[test]
fn test_edge_enum_member_access() {
    assert_eq!(errors("enum Color { Red, Green, Blue }\nColor.Red;"), 0);
}

/// EDGE CASE: unknown enum member is a diagnostic
#[test]
fn test_edge_unknown_enum_member() {
    assert_eq!(errors("enum Color { Red, Green, Blue }\nColor.Purple;"), 1);
}

// ==================== OPERATORS ====================

/// EDGE CASE: numeric operands required by arithmetic operators
#[test]
fn test_edge_arithmetic_requires_numbers() {
    assert_eq!(errors("let x = true - false;"), 2);
}

/// EDGE CASE: plus accepts a string operand and yields string
#[test]
fn test_edge_plus_with_string_operand() {
    assert_eq!(errors("let greeting: string = \"hi \" + 1;"), 0);
}

// ==================== RETURN TYPES ====================

/// EDGE CASE: return value incompatible with the declared return type
#[test]
fn test_edge_return_type_mismatch() {
    assert_eq!(errors("function f(): number { return \"hi\"; }"), 1);
}

// ==================== CLASS FIELD INITIALIZERS ====================

/// EDGE CASE: an un-annotated field initializer referencing a top-level
/// function must not be checked during declaration collection (pass 3),
/// where function signatures (pass 4) aren't in scope yet.
#[test]
fn test_edge_field_initializer_references_later_function() {
    let source = "class C { f = helper(); }\nfunction helper(): number { return 1; }";
    assert_eq!(errors(source), 0);
}

/// EDGE CASE: same as above but for a top-level `let` binding.
#[test]
fn test_edge_field_initializer_references_top_level_let() {
    let source = "let base = 10;\nclass C { f = base; }";
    assert_eq!(errors(source), 0);
}

/// EDGE CASE: an annotated field initializer is still checked for
/// assignability in pass 5.
#[test]
fn test_edge_field_initializer_assignability_checked() {
    let source = "class C { f: number = \"hi\"; }";
    assert_eq!(errors(source), 1);
}

/// EDGE CASE: diagnostics remain in non-decreasing source-line order even
/// when a class with an erroring field initializer appears after another
/// erroring statement. Before the fix, the field initializer's "Cannot
/// find name" was reported during declaration collection (before any
/// statement is walked), landing ahead of the earlier-line error.
#[test]
fn test_edge_field_initializer_diagnostic_ordering() {
    let source = "let x: number = \"hi\";\nclass C { f = nowhere(); }";
    let lines: Vec<u32> = diagnostics(source)
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.line)
        .collect();
    assert_eq!(lines, vec![1, 2]);
}
