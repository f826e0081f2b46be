//! Parse errors (§7: `SyntaxError`, fatal per-compilation).

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Expected {expected}, found '{found}'")]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub line: u32,
}

pub type ParseResult<T> = Result<T, ParseError>;
