//! Fundamental components of a token stream.
use std::fmt;
use std::ops::Range;

use serde::Serialize;

use super::Diagnostic;

/// A half-open `[start, end)` range of byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// An empty span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// The kind of a token, which is what the grammar switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// The `@` which starts an object.
    At,
    /// An object type, entry key, field key, or macro variable.
    Name,
    /// A run of ASCII digits.
    Number,
    LBrace,
    RBrace,
    Equals,
    Comma,
    /// The `#` concatenation operator.
    Sharp,
    /// The `string` keyword of an `@string` object.
    StringKeyword,
    /// The `preamble` keyword of an `@preamble` object.
    PreambleKeyword,
    /// The `comment` keyword of an `@comment` object.
    CommentKeyword,
    /// Text delimited by curly braces.
    Content,
    /// Text delimited by double quotes.
    StringLiteralText,
    /// Text between objects.
    MetaContent,
    /// A malformed object, collapsed into a single token.
    Error,
    /// The sentinel which terminates every stream.
    EndOfInput,
}

impl TokenKind {
    /// Whether consecutive tokens of this kind are merged into a single token.
    #[inline]
    pub fn is_accumulating(self) -> bool {
        matches!(self, Self::Content | Self::StringLiteralText)
    }

    /// Whether this token marks the left boundary of a malformed object during recovery.
    #[inline]
    pub fn is_object_boundary(self) -> bool {
        matches!(self, Self::At | Self::MetaContent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::At => "AT",
            Self::Name => "NAME",
            Self::Number => "NUMBER",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Equals => "EQ",
            Self::Comma => "COMMA",
            Self::Sharp => "SHARP",
            Self::StringKeyword => "STRING",
            Self::PreambleKeyword => "PREAMBLE",
            Self::CommentKeyword => "COMMENT",
            Self::Content => "CONTENT",
            Self::StringLiteralText => "STRING_LITERAL",
            Self::MetaContent => "META_CONTENT",
            Self::Error => "ERROR",
            Self::EndOfInput => "$end",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexed token.
///
/// The text is owned: coalesced tokens accumulate text from several scans, and the text of a
/// token produced with line break stripping no longer corresponds to a source slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) diagnostic: Option<Box<Diagnostic>>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            diagnostic: None,
        }
    }

    /// The end-of-input sentinel positioned at `offset`.
    pub fn end_of_input(offset: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "", Span::empty(offset))
    }

    /// An error token covering `span` and carrying `diagnostic`.
    pub fn error(diagnostic: Diagnostic, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: TokenKind::Error,
            text: text.into(),
            span,
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// The diagnostic payload, present exactly when this is an [`TokenKind::Error`] token.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_deref()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Append the text of a following token of the same kind.
    pub(crate) fn absorb(&mut self, text: &str, span: Span) {
        debug_assert!(self.kind.is_accumulating());
        self.text.push_str(text);
        self.span = self.span.cover(span);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostic() {
            Some(diagnostic) => write!(f, "{}({})", self.kind, diagnostic.code.code()),
            None => write!(f, "{}({:?})", self.kind, self.text),
        }
    }
}
