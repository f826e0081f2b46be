//! Lexical errors (§7: `LexicalError`, fatal per-compilation).

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LexError {
    #[error("Unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    #[error("Unterminated template literal")]
    UnterminatedTemplate { line: u32, column: u32 },

    #[error("Unterminated block comment")]
    UnterminatedComment { line: u32, column: u32 },

    #[error("Unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, line: u32, column: u32 },

    #[error("Unexpected '.'")]
    IncompleteEllipsis { line: u32, column: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnterminatedString { line, .. }
            | LexError::UnterminatedTemplate { line, .. }
            | LexError::UnterminatedComment { line, .. }
            | LexError::UnexpectedCharacter { line, .. }
            | LexError::IncompleteEllipsis { line, .. } => *line,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
