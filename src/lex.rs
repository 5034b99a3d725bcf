//! # The lexer session
//! A [`Lexer`] turns BibTeX source text into a stream of [`Token`]s in a single forward pass.
//!
//! ```
//! use bibtex_lexer::{Lexer, LexerConfig, TokenKind};
//!
//! let mut lexer = Lexer::new(LexerConfig::default());
//! lexer.set_source("@article{k, title = \"A\"}");
//! lexer.run()?;
//! assert_eq!(
//!     lexer.kinds(),
//!     vec![
//!         TokenKind::At,
//!         TokenKind::Name,
//!         TokenKind::LBrace,
//!         TokenKind::Name,
//!         TokenKind::Comma,
//!         TokenKind::Name,
//!         TokenKind::Equals,
//!         TokenKind::StringLiteralText,
//!         TokenKind::RBrace,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! # Ok::<(), bibtex_lexer::Error>(())
//! ```
//!
//! Tokens can also be pulled one at a time with [`Lexer::next_token`], in which case the source
//! is only scanned as far as needed to produce the next token. Malformed objects never stop the
//! session: each one is replaced by a single [`TokenKind::Error`] token and lexing resumes
//! immediately after the offending character.
mod cursor;
mod handlers;
mod state;

pub use cursor::{Cursor, Delimiters, ObjectStart, Pattern, Scanned};
pub(crate) use state::Fault;
pub use state::{LexerState, Mode, ObjectKind};

use tracing::{debug, trace, warn};

use crate::config::LexerConfig;
use crate::error::{Error, Result};
use crate::token::{Token, TokenBuffer, TokenKind};

/// A lexing session over one source at a time.
///
/// The session is configured before scanning starts, bound to a source with
/// [`Lexer::set_source`], and then driven either to completion with [`Lexer::run`] or lazily
/// with [`Lexer::next_token`].
#[derive(Debug)]
pub struct Lexer<'s> {
    config: LexerConfig,
    cursor: Option<Cursor<'s>>,
    state: LexerState,
    buffer: TokenBuffer,
    /// The next free text scan starts an object at the cursor.
    resume: bool,
    started: bool,
    finished: bool,
}

impl Default for Lexer<'_> {
    fn default() -> Self {
        Self::new(LexerConfig::default())
    }
}

impl<'s> Lexer<'s> {
    /// Create a new lexer with no source.
    pub fn new(config: LexerConfig) -> Self {
        Self {
            config,
            cursor: None,
            state: LexerState::default(),
            buffer: TokenBuffer::new(&config),
            resume: false,
            started: false,
            finished: false,
        }
    }

    /// A lexer bound to `source`, consumed as an iterator of tokens.
    pub fn stream(source: &'s str, config: LexerConfig) -> TokenStream<'s> {
        let mut lexer = Self::new(config);
        lexer.set_source(source);
        TokenStream { lexer, done: false }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Replace the configuration. This fails once scanning of the bound source has started; bind
    /// a new source with [`Lexer::set_source`] first.
    pub fn configure(&mut self, config: LexerConfig) -> Result<()> {
        if self.started {
            return Err(Error::SessionStarted);
        }
        self.config = config;
        self.buffer = TokenBuffer::new(&config);
        Ok(())
    }

    /// Bind a new source, discarding all state from any previous source.
    pub fn set_source(&mut self, source: &'s str) {
        debug!(len = source.len(), "binding source");
        self.cursor = Some(Cursor::new(source));
        self.state = LexerState::default();
        self.buffer = TokenBuffer::new(&self.config);
        self.resume = false;
        self.started = false;
        self.finished = false;
    }

    /// The bound source, if any.
    pub fn source(&self) -> Option<&'s str> {
        self.cursor.as_ref().map(Cursor::source)
    }

    /// Scan the whole remaining source. The tokens are then available from
    /// [`Lexer::next_token`], [`Lexer::pending`], or [`Lexer::drain`].
    pub fn run(&mut self) -> Result<()> {
        if self.cursor.is_none() {
            return Err(Error::NoSource);
        }
        while !self.finished {
            self.step();
        }
        Ok(())
    }

    /// Remove and return the next token, scanning only as much as required.
    ///
    /// Once the [`TokenKind::EndOfInput`] token has been returned, every further call returns
    /// another end-of-input token.
    pub fn next_token(&mut self) -> Result<Token> {
        let len = self.source().ok_or(Error::NoSource)?.len();
        loop {
            if let Some(token) = self.buffer.pop_front() {
                return Ok(token);
            }
            if self.finished {
                return Ok(Token::end_of_input(len));
            }
            self.step();
        }
    }

    /// The current state of the state machine.
    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Whether the whole source has been scanned.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Iterate over the tokens which are ready but not yet consumed.
    pub fn pending(&self) -> impl Iterator<Item = &Token> {
        self.buffer.iter()
    }

    /// The kinds of the tokens which are ready but not yet consumed.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.pending().map(|token| token.kind).collect()
    }

    /// Take every token which is ready.
    pub fn drain(&mut self) -> Vec<Token> {
        self.buffer.drain()
    }

    /// Advance the state machine by one handler call.
    fn step(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        self.started = true;

        if cursor.at_end() {
            let offset = cursor.position();
            if let Err(fault) = handlers::end_of_input(self.state, offset) {
                self.recover(fault);
            }
            self.buffer.finish(offset);
            self.finished = true;
            debug!(tokens = self.buffer.len(), "finished source");
            return;
        }

        let buffer = &mut self.buffer;
        let resume = std::mem::take(&mut self.resume);
        let step = match self.state.mode {
            Mode::FreeText => handlers::free_text(cursor, buffer, self.config.strict || resume),
            Mode::Header => handlers::header(cursor, buffer, self.state),
            Mode::StringLiteral => handlers::literal(cursor, buffer, self.state),
            Mode::Content => handlers::content(cursor, buffer, self.state),
        };

        match step {
            Ok(next) => self.transition(next),
            Err(fault) => self.recover(fault),
        }
    }

    fn transition(&mut self, next: LexerState) {
        if next.mode != self.state.mode {
            trace!(from = ?self.state.mode, to = ?next.mode, depth = next.depth, "mode change");
        }
        if next.is_idle() {
            self.buffer.commit();
        }
        self.state = next;
    }

    /// Replace the malformed object by an error token and return to free text. If the object was
    /// interrupted by the `@` of the next object, lexing resumes at that `@`.
    fn recover(&mut self, fault: Fault) {
        warn!(
            kind = %fault.kind,
            offset = fault.offset,
            fragment = ?fault.fragment,
            mode = ?self.state.mode,
            depth = self.state.depth,
            "malformed object"
        );
        let source = self.source().unwrap_or_default();
        self.resume = fault.at_object;
        let discarded = self.buffer.collapse(fault, source);
        trace!(discarded, "discarded tokens of malformed object");
        self.state = LexerState::default();
    }
}

/// An iterator over every token of a source, up to and including [`TokenKind::EndOfInput`].
#[derive(Debug)]
pub struct TokenStream<'s> {
    lexer: Lexer<'s>,
    done: bool,
}

impl<'s> TokenStream<'s> {
    /// The underlying lexer.
    pub fn lexer(&self) -> &Lexer<'s> {
        &self.lexer
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.lexer.next_token().ok()?;
        self.done = token.is(TokenKind::EndOfInput);
        Some(token)
    }
}

/// Lex `source` completely.
pub fn tokenize(source: &str, config: LexerConfig) -> Vec<Token> {
    Lexer::stream(source, config).collect()
}
