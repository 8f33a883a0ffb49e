//! Lexing and parsing errors.

use thiserror::Error;

/// Error produced while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated string: ends with escape character")]
    UnterminatedStringEscape,
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscapeSequence(char),
    #[error("Integer literal out of range: {0}")]
    IntegerOutOfRange(String),
}

/// Used by logos for input that matches no token. The text is filled in by [`crate::lexer::Lexer`].
impl Default for LexError {
    fn default() -> Self {
        LexError::UnknownCharacter(String::new())
    }
}

/// Represents a syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A structural mismatch, e.g. a missing closing delimiter.
    #[error("Expected {expected}, got {found}")]
    Expected {
        expected: &'static str,
        found: &'static str,
    },
    /// A token that cannot begin the construct being parsed.
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
}
