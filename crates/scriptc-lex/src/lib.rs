//! scriptc-lex - Lexical analyzer
//!
//! ============================================================================
//! LEXICAL ANALYSIS
//! ============================================================================
//!
//! Turns a source text into a stream of [`Token`]s terminated by exactly one
//! `Eof` token. Single left-to-right pass, no backtracking: every accepted
//! prefix commits immediately. Fails with a [`LexError`] on an unterminated
//! string/template, an unterminated block comment, a stray `.` not
//! completing `...`, or any character that begins no token.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// `tokenize(source) -> sequence of tokens terminated by an end-of-file
/// token` (§4.1).
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::tokenize(source)
}
