use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of a [`Lexer`](crate::Lexer) session.
///
/// Malformed input never results in an `Error`: lexical errors are recovered from and reported
/// in-band as [`TokenKind::Error`](crate::TokenKind::Error) tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The session was driven before any source was bound with `set_source`.
    NoSource,
    /// The configuration was changed after scanning of the bound source began.
    SessionStarted,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoSource => f.write_str("lexer has no source: call `set_source` first"),
            Error::SessionStarted => {
                f.write_str("lexer configuration cannot change once scanning has started")
            }
        }
    }
}

impl std::error::Error for Error {}
