//! # A lexical analyzer for BibTeX
//!
//! This crate turns `.bib` source text into a flat stream of typed [`Token`]s for a downstream
//! grammar. It is deliberately only a lexer: it does not build entries, resolve macros, or check
//! that entry types or field names are meaningful.
//!
//! The lexer is a state machine over four [`Mode`]s. Outside of any object it is in
//! [`Mode::FreeText`] and looks for the `@` which starts the next object. Inside an object it is in
//! [`Mode::Header`], where names, numbers, and punctuation are recognized, and it switches to
//! [`Mode::Content`] inside brace-delimited values and to [`Mode::StringLiteral`] inside quoted
//! values. The brace depth of the current object decides when a value ends versus when it
//! merely nests.
//!
//! ```
//! use bibtex_lexer::{tokenize, LexerConfig, TokenKind};
//!
//! let tokens = tokenize("@string{me = {Alex {R}utar}}", LexerConfig::default());
//! let content = tokens.iter().find(|token| token.kind == TokenKind::Content).unwrap();
//! assert_eq!(content.text, "Alex {R}utar");
//! ```
//!
//! ## Malformed input
//! Lexing never stops on malformed input. When an object is malformed, the tokens already
//! produced for it are collapsed into a single [`TokenKind::Error`] token whose [`Diagnostic`]
//! records the [`ErrorKind`], the offending fragment and offset, and the discarded tokens. The
//! lexer then continues in free text immediately after the offending character, so a malformed
//! object never affects its neighbours. An `@` which interrupts an unfinished object is not
//! consumed: it starts the next object.
//! ```
//! use bibtex_lexer::{tokenize, ErrorKind, LexerConfig, TokenKind};
//!
//! let tokens = tokenize("@string{x = \"abc} @misc{ok}", LexerConfig::default());
//! assert_eq!(tokens[0].kind, TokenKind::Error);
//! assert_eq!(tokens[0].diagnostic().unwrap().code, ErrorKind::UnterminatedString);
//! assert_eq!(tokens[1].kind, TokenKind::At);
//! ```
//! Errors are part of the token stream rather than returned, so the consumer decides whether
//! they are fatal. The only [`Error`] returned by this crate is misuse of a [`Lexer`] session.
//!
//! ## Logging
//! Recovered errors are reported with [`tracing`] at the `warn` level, and state machine
//! transitions at the `trace` level.

/// Lexer configuration.
pub mod config;

/// Error types for lexer sessions.
pub mod error;

/// The lexer session and its state machine.
pub mod lex;

/// Line and column computation.
pub mod position;

/// Token types.
pub mod token;

// re-exports
pub use config::LexerConfig;
pub use error::{Error, Result};
pub use lex::{Lexer, LexerState, Mode, ObjectKind, TokenStream, tokenize};
pub use position::{LineColumn, line_column};
pub use token::{Diagnostic, ErrorKind, Span, Token, TokenKind};
