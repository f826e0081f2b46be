//! Diagnostics.
//!
//! A diagnostic is `{ message, line, optional column, severity }` (§3). The
//! [`Handler`] is an append-only accumulator: the checker calls
//! [`Handler::error`] as it walks the tree and never mutates or reorders
//! what it already recorded (§4.3).
//!
//! ```
//! use scriptc_util::{Handler, Span};
//!
//! let handler = Handler::new();
//! handler.error("unexpected token", Span::new(3, 1));
//! assert!(handler.has_errors());
//! ```

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: Option<u32>,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: Some(span.column),
            severity: Severity::Error,
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: Some(span.column),
            severity: Severity::Warning,
        }
    }

    /// A diagnostic reported without a reliable position (the flattened
    /// lex/parse fault described in §7/§9 open question 4).
    pub fn at_line_one(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 1,
            column: None,
            severity: Severity::Error,
        }
    }
}

/// Append-only diagnostic sink.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: std::cell::RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.diagnostics.borrow_mut().push(Diagnostic::error(message, span));
    }

    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.diagnostics.borrow_mut().push(Diagnostic::warning(message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Consumes the handler's recorded diagnostics, in discovery order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_in_order() {
        let handler = Handler::new();
        handler.error("first", Span::new(5, 1));
        handler.error("second", Span::new(2, 1));
        let diags = handler.into_diagnostics();
        assert_eq!(diags[0].message, "first");
        assert_eq!(diags[1].message, "second");
    }
}
