//! # Lexer configuration
//! A [`LexerConfig`] is fixed for the duration of a lexing session. It can be built in code
//! ```
//! use bibtex_lexer::LexerConfig;
//!
//! let config = LexerConfig::default().with_strict(false).with_meta_content(true);
//! assert!(config.include_errors);
//! ```
//! or deserialized from any serde format; missing keys take their default values.
use serde::{Deserialize, Serialize};

/// Options for a lexing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Keep error tokens in the output stream. If `false`, malformed objects are dropped silently.
    pub include_errors: bool,
    /// Keep the free text between objects as [`MetaContent`](crate::TokenKind::MetaContent)
    /// tokens.
    pub include_meta_content: bool,
    /// Start an object at any `@` in free text. If `false`, an `@` only starts an object when it
    /// is the first non-blank character on its line.
    pub strict: bool,
    /// Replace each line break, together with the whitespace following it, by a single space
    /// inside bracketed and quoted text.
    pub strip_line_breaks: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            include_errors: true,
            include_meta_content: false,
            strict: true,
            strip_line_breaks: false,
        }
    }
}

impl LexerConfig {
    pub fn with_errors(mut self, include_errors: bool) -> Self {
        self.include_errors = include_errors;
        self
    }

    pub fn with_meta_content(mut self, include_meta_content: bool) -> Self {
        self.include_meta_content = include_meta_content;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_strip_line_breaks(mut self, strip_line_breaks: bool) -> Self {
        self.strip_line_breaks = strip_line_breaks;
        self
    }
}
