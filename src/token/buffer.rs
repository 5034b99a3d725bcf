//! # Token buffering
//! The [`TokenBuffer`] keeps the tokens of the object under construction in a working log, apart
//! from the queue of finished tokens which the consumer pulls from. Only complete objects reach
//! the queue: a malformed object is collapsed in the log into a single error token before it is
//! released, so the consumer never observes a partial object.
use std::borrow::Cow;
use std::collections::VecDeque;

use memchr::memchr;

use super::{Diagnostic, Span, Token, TokenKind};
use crate::config::LexerConfig;
use crate::lex::Fault;

#[derive(Debug)]
pub(crate) struct TokenBuffer {
    log: Vec<Token>,
    queue: VecDeque<Token>,
    include_errors: bool,
    include_meta_content: bool,
    strip_line_breaks: bool,
}

impl TokenBuffer {
    pub fn new(config: &LexerConfig) -> Self {
        Self {
            log: Vec::new(),
            queue: VecDeque::new(),
            include_errors: config.include_errors,
            include_meta_content: config.include_meta_content,
            strip_line_breaks: config.strip_line_breaks,
        }
    }

    /// Append a token of the current object to the working log.
    ///
    /// A token of an accumulating kind which follows a token of the same kind is merged into it.
    pub fn push(&mut self, token: Token) {
        if token.kind.is_accumulating() {
            if let Some(last) = self.log.last_mut() {
                if last.kind == token.kind {
                    last.absorb(&token.text, token.span);
                    return;
                }
            }
        }
        self.log.push(token);
    }

    /// Queue free text found between objects, if meta content is retained.
    pub fn push_meta(&mut self, token: Token) {
        debug_assert_eq!(token.kind, TokenKind::MetaContent);
        self.commit();
        if self.include_meta_content {
            self.queue.push_back(token);
        }
    }

    /// Release the tokens of a completed object to the queue.
    pub fn commit(&mut self) {
        let strip = self.strip_line_breaks;
        self.queue.extend(self.log.drain(..).map(|mut token| {
            if strip && token.kind.is_accumulating() {
                if let Cow::Owned(stripped) = strip_line_breaks(&token.text) {
                    token.text = stripped;
                }
            }
            token
        }));
    }

    /// Release every pending token followed by the end-of-input sentinel at `offset`.
    pub fn finish(&mut self, offset: usize) {
        self.commit();
        self.queue.push_back(Token::end_of_input(offset));
    }

    /// Collapse the malformed object at the end of the log into a single error token.
    ///
    /// Tokens are taken from the back of the log up to and including the most recent object
    /// boundary; these form the trace of the error. Returns the number of tokens discarded.
    pub fn collapse(&mut self, fault: Fault, source: &str) -> usize {
        let boundary = self
            .log
            .iter()
            .rposition(|token| token.kind.is_object_boundary())
            .unwrap_or(0);
        let trace = self.log.split_off(boundary);
        let discarded = trace.len();

        // anything before the boundary belongs to an earlier object
        self.commit();

        if self.include_errors {
            let start = trace.first().map_or(fault.offset, |token| token.span.start);
            let end = if fault.at_object {
                fault.offset
            } else {
                fault.offset + fault.fragment.len()
            };
            let span = Span::new(start, end);
            let text = source.get(span.range()).unwrap_or_default().to_owned();

            let diagnostic = Diagnostic {
                code: fault.kind,
                fragment: fault.fragment,
                offset: fault.offset,
                trace,
            };
            self.queue.push_back(Token::error(diagnostic, text, span));
        }

        discarded
    }

    /// Remove and return the token at the front of the queue.
    pub fn pop_front(&mut self) -> Option<Token> {
        self.queue.pop_front()
    }

    /// Take every queued token.
    pub fn drain(&mut self) -> Vec<Token> {
        self.queue.drain(..).collect()
    }

    /// Iterate over the queued tokens without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.queue.iter()
    }

    /// The number of queued tokens.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// The number of tokens of the current object not yet released.
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.log.len()
    }
}

/// Replace each line break and the whitespace following it by a single space.
fn strip_line_breaks(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = memchr(b'\n', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut stripped = String::with_capacity(text.len());
    let mut pos = 0;
    let mut next = Some(first);

    while let Some(idx) = next {
        let line_end = if idx > pos && bytes[idx - 1] == b'\r' {
            idx - 1
        } else {
            idx
        };
        stripped.push_str(&text[pos..line_end]);
        stripped.push(' ');

        pos = idx + 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        next = memchr(b'\n', &bytes[pos..]).map(|offset| pos + offset);
    }
    stripped.push_str(&text[pos..]);

    Cow::Owned(stripped)
}
