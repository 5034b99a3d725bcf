use std::fmt;

use serde::Serialize;

use super::Token;
use crate::position::{LineColumn, line_column};

/// Lexical errors. These are recovered from and surfaced as [`TokenKind::Error`](super::TokenKind::Error)
/// tokens rather than returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A closing bracket with no matching opening bracket.
    UnbalancedBraces,
    /// A quoted value which is not closed before a line break, the end of its object, or the end
    /// of input.
    UnterminatedString,
    /// A bracketed value or object body which is still open at the end of input.
    UnterminatedContent,
    /// A character which cannot start any token in the current position, or the `@` of a new
    /// object before the current one is closed.
    UnexpectedToken,
}

impl ErrorKind {
    /// A short stable code identifying the error.
    pub fn code(self) -> &'static str {
        match self {
            Self::UnbalancedBraces => "E_UNBALANCED",
            Self::UnterminatedString => "E_STRING",
            Self::UnterminatedContent => "E_CONTENT",
            Self::UnexpectedToken => "E_UNEXPECTED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedBraces => f.write_str("unbalanced braces"),
            Self::UnterminatedString => f.write_str("unterminated string literal"),
            Self::UnterminatedContent => f.write_str("unterminated bracketed content"),
            Self::UnexpectedToken => f.write_str("unexpected token"),
        }
    }
}

/// The payload of an error token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// The error which occurred.
    pub code: ErrorKind,
    /// The offending text, empty if the error was detected at the end of input.
    pub fragment: String,
    /// The byte offset of the offending text.
    ///
    /// Errors detected at the end of input are reported at the source length, including an
    /// object whose body never opened. The `@` of the malformed object is the start of the first
    /// token of the trace.
    pub offset: usize,
    /// The tokens of the malformed object which were discarded, in source order.
    pub trace: Vec<Token>,
}

impl Diagnostic {
    /// The line and column of the offending text in `source`.
    pub fn location(&self, source: &str) -> LineColumn {
        line_column(source, self.offset)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragment.is_empty() {
            write!(f, "{} at end of input", self.code)
        } else {
            write!(
                f,
                "{} at byte {}: {:?}",
                self.code, self.offset, self.fragment
            )
        }
    }
}
