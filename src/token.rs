//! # Tokens produced by the lexer.
//!
//! This module implements the token stream representation shared by the lexer and its
//! consumers.
//!
//! | Type           | Description                                                    |
//! |----------------|----------------------------------------------------------------|
//! | [`TokenKind`]  | the closed set of token kinds a grammar switches on            |
//! | [`Token`]      | a kind with its owned text and source [`Span`]                 |
//! | [`Diagnostic`] | the payload of an error token, with the discarded trace        |
//! | [`ErrorKind`]  | the lexical error classes                                      |
mod buffer;
mod error;
mod types;
mod validate;

pub(crate) use buffer::TokenBuffer;
pub use error::*;
pub use types::*;
pub(crate) use validate::{NAME_ALLOWED, WHITESPACE};
pub use validate::{is_name, is_number};
