//! scriptc-drv - compiler entry point and orchestrator (§6).
//!
//! Wires the four stage crates into a single `compile` call and provides
//! the diagnostic-formatting helper the CLI prints on failure:
//!
//! ```text
//! source text ─▶ tokenize ─▶ tokens ─▶ parse ─▶ tree ─▶ check ─▶ diagnostics
//!                                             └───────────▶ emit ─▶ output text
//! ```
//!
//! Control flow is strictly sequential and never loops back: `parse` does
//! not consult `check`, `emit` does not consult `check` (§2). Lex/parse
//! failure is raised as a single fault and flattened to one `line = 1`
//! diagnostic here, at the boundary — this is the only place in the
//! workspace that performs that flattening (§7, §9 open question 4);
//! `scriptc-lex`/`scriptc-parse` themselves keep the real line/lexeme on
//! their `thiserror` error types until they reach this point.

pub mod error;

pub use error::DriverError;

use scriptc_util::Diagnostic;

/// Options accepted by [`compile`] (§6).
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Skip the checker entirely; `success` then only reflects whether the
    /// source lexed and parsed.
    pub skip_type_check: bool,
    /// Include the parsed tree in the result.
    pub include_ast: bool,
    /// Include the token stream in the result.
    pub include_tokens: bool,
}

/// Result of a single [`compile`] call (§6).
#[derive(Debug, Default)]
pub struct CompileOutput {
    pub success: bool,
    pub output: Option<String>,
    pub errors: Vec<Diagnostic>,
    pub ast: Option<scriptc_parse::ast::Program>,
    pub tokens: Option<Vec<scriptc_lex::Token>>,
}

/// `compile(source, options) -> { success, output?, errors, ast?, tokens? }`
/// (§6). Never panics on malformed input; lex/parse failure is reported as
/// a single `errors` entry and no `output`.
pub fn compile(source: &str, options: CompileOptions) -> CompileOutput {
    let _span = tracing::debug_span!("compile").entered();

    let tokens = {
        let _lex = tracing::debug_span!("lex").entered();
        match scriptc_lex::tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::debug!(error = %err, "lex failed");
                return CompileOutput {
                    success: false,
                    output: None,
                    errors: vec![Diagnostic::at_line_one(err.to_string())],
                    ast: None,
                    tokens: None,
                };
            }
        }
    };
    tracing::debug!(count = tokens.len(), "tokenized");

    let included_tokens = options.include_tokens.then(|| tokens.clone());

    let program = {
        let _parse = tracing::debug_span!("parse").entered();
        match scriptc_parse::parse(tokens) {
            Ok(program) => program,
            Err(err) => {
                tracing::debug!(error = %err, "parse failed");
                return CompileOutput {
                    success: false,
                    output: None,
                    errors: vec![Diagnostic::at_line_one(err.to_string())],
                    ast: None,
                    tokens: included_tokens,
                };
            }
        }
    };
    tracing::debug!(statements = program.statements.len(), "parsed");

    let errors = if options.skip_type_check {
        Vec::new()
    } else {
        let _check = tracing::debug_span!("check").entered();
        let diagnostics = scriptc_check::check(&program);
        tracing::debug!(count = diagnostics.len(), "checked");
        diagnostics
    };

    // Emission always runs once parsing succeeds (§2): `success` is gated
    // on the checker, not on whether we produced output.
    let output = {
        let _emit = tracing::debug_span!("emit").entered();
        scriptc_emit::emit(&program)
    };

    let success = errors.is_empty();
    let included_ast = options.include_ast.then(|| program.clone());

    CompileOutput {
        success,
        output: Some(output),
        errors,
        ast: included_ast,
        tokens: included_tokens,
    }
}

/// `formatErrors(errors, source?) -> text` (§6). Each diagnostic renders as
/// `Error (line N): <message>`, followed by `  N | <source line N>` when
/// `source` is supplied and the line exists.
pub fn format_errors(errors: &[Diagnostic], source: Option<&str>) -> String {
    let mut out = String::new();

    for diag in errors {
        out.push_str(&format!("Error (line {}): {}\n", diag.line, diag.message));
        if let Some(source) = source {
            if let Some(text) = scriptc_util::span::source_line(source, diag.line) {
                out.push_str(&format!("  {} | {}\n", diag.line, text));
            }
        }
    }

    out
}
