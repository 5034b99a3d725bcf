//! Forward-only cursor over the source text.
//!
//! All delimiters searched for are ASCII, so every position the cursor stops at is a char
//! boundary of the source and slicing never fails.
use memchr::{memchr, memchr2, memchr3, memchr_iter};

use crate::token::WHITESPACE;

/// Something which can be matched at the start of the remaining input.
pub trait Pattern {
    /// The length of the match at the start of `input`, if any. Matches are never empty.
    fn match_len(&self, input: &[u8]) -> Option<usize>;
}

impl Pattern for u8 {
    #[inline]
    fn match_len(&self, input: &[u8]) -> Option<usize> {
        (input.first() == Some(self)).then_some(1)
    }
}

/// A byte class matches the longest non-empty run of bytes in the class.
impl Pattern for &[bool; 256] {
    #[inline]
    fn match_len(&self, input: &[u8]) -> Option<usize> {
        let len = input.iter().take_while(|b| self[**b as usize]).count();
        (len > 0).then_some(len)
    }
}

/// The delimiter sets used by [`Cursor::scan_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiters {
    /// `{` and `}`.
    Braces,
    /// `{`, `}`, `"` and the line feed.
    Quoted,
}

/// Returns the earliest of two optional positions.
#[inline]
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

impl Delimiters {
    /// Find the first delimiter or backslash in `haystack`.
    #[inline]
    fn find(self, haystack: &[u8]) -> Option<usize> {
        match self {
            Self::Braces => memchr3(b'{', b'}', b'\\', haystack),
            Self::Quoted => earliest_of(
                memchr3(b'{', b'}', b'"', haystack),
                memchr2(b'\n', b'\\', haystack),
            ),
        }
    }
}

/// The result of [`Cursor::scan_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned<'s> {
    /// The scanned text, including the delimiter if one was found.
    pub text: &'s str,
    /// The byte offset at which the scan started.
    pub start: usize,
    /// The delimiter which stopped the scan, or `None` if the end of input was reached.
    pub delimiter: Option<u8>,
}

impl<'s> Scanned<'s> {
    /// The scanned text without the delimiter.
    pub fn body(&self) -> &'s str {
        match self.delimiter {
            Some(_) => &self.text[..self.text.len() - 1],
            None => self.text,
        }
    }

    /// The byte offset of the delimiter, or of the end of input.
    pub fn delimiter_offset(&self) -> usize {
        self.start + self.body().len()
    }
}

/// The result of [`Cursor::scan_to_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStart<'s> {
    /// Free text preceding the object.
    pub meta: &'s str,
    /// The offset of the `@` which starts the object, or `None` if the end of input was reached.
    pub at: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The remaining input.
    pub fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Consume a single char and return it.
    pub fn bump_char(&mut self) -> Option<&'s str> {
        let ch = self.rest().chars().next()?;
        let start = self.pos;
        self.pos += ch.len_utf8();
        Some(&self.source[start..self.pos])
    }

    /// Attempt to match `pattern` at the current position, advancing past the match on success.
    /// On failure the position is unchanged.
    #[inline]
    pub fn try_match<P: Pattern>(&mut self, pattern: P) -> Option<&'s str> {
        let len = pattern.match_len(&self.source.as_bytes()[self.pos..])?;
        let start = self.pos;
        self.pos += len;
        Some(&self.source[start..self.pos])
    }

    /// Skip ASCII whitespace, returning whether anything was skipped.
    #[inline]
    pub fn skip_whitespace(&mut self) -> bool {
        self.try_match(&WHITESPACE).is_some()
    }

    /// Consume input up to and including the first of `delimiters`, or the remaining input if
    /// there is none.
    ///
    /// A backslash escapes the following ASCII byte, which then never counts as a delimiter.
    pub fn scan_until(&mut self, delimiters: Delimiters) -> Scanned<'s> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut pos = start;

        while let Some(idx) = delimiters.find(&bytes[pos..]) {
            let found = pos + idx;
            if bytes[found] == b'\\' {
                pos = found + 1;
                if pos < bytes.len() && bytes[pos].is_ascii() {
                    pos += 1;
                }
                continue;
            }

            self.pos = found + 1;
            return Scanned {
                text: &self.source[start..self.pos],
                start,
                delimiter: Some(bytes[found]),
            };
        }

        self.pos = bytes.len();
        Scanned {
            text: &self.source[start..],
            start,
            delimiter: None,
        }
    }

    /// Consume free text up to and including the next `@` which starts an object.
    ///
    /// In strict mode every `@` starts an object. Otherwise an `@` only starts an object if it
    /// is preceded on its line by nothing but spaces and tabs.
    pub fn scan_to_object(&mut self, strict: bool) -> ObjectStart<'s> {
        let start = self.pos;
        let rest = &self.source.as_bytes()[start..];

        let found = if strict {
            memchr(b'@', rest)
        } else {
            memchr_iter(b'@', rest).find(|idx| self.at_line_start(start + idx))
        };

        match found {
            Some(idx) => {
                let at = start + idx;
                self.pos = at + 1;
                ObjectStart {
                    meta: &self.source[start..at],
                    at: Some(at),
                }
            }
            None => {
                self.pos = self.source.len();
                ObjectStart {
                    meta: &self.source[start..],
                    at: None,
                }
            }
        }
    }

    /// Whether only spaces and tabs precede `offset` on its line.
    fn at_line_start(&self, offset: usize) -> bool {
        self.source.as_bytes()[..offset]
            .iter()
            .rev()
            .find(|b| !matches!(b, b' ' | b'\t'))
            .is_none_or(|b| *b == b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NAME_ALLOWED;

    #[test]
    fn test_try_match() {
        let mut cursor = Cursor::new("key0, rest");
        assert_eq!(cursor.try_match(b','), None);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.try_match(&NAME_ALLOWED), Some("key0"));
        assert_eq!(cursor.try_match(b','), Some(","));
        assert!(cursor.skip_whitespace());
        assert!(!cursor.skip_whitespace());
        assert_eq!(cursor.rest(), "rest");
    }

    #[test]
    fn test_try_match_unicode() {
        let mut cursor = Cursor::new("artüçÑcle{");
        assert_eq!(cursor.try_match(&NAME_ALLOWED), Some("artüçÑcle"));
        assert_eq!(cursor.peek(), Some(b'{'));
    }

    #[test]
    fn test_bump_char() {
        let mut cursor = Cursor::new("🍄a");
        assert_eq!(cursor.bump_char(), Some("🍄"));
        assert_eq!(cursor.bump_char(), Some("a"));
        assert_eq!(cursor.bump_char(), None);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_scan_until_braces() {
        let mut cursor = Cursor::new("a {b} c}");
        let scanned = cursor.scan_until(Delimiters::Braces);
        assert_eq!(scanned.text, "a {");
        assert_eq!(scanned.body(), "a ");
        assert_eq!(scanned.delimiter, Some(b'{'));
        assert_eq!(scanned.delimiter_offset(), 2);

        let scanned = cursor.scan_until(Delimiters::Braces);
        assert_eq!((scanned.text, scanned.start), ("b}", 3));

        let scanned = cursor.scan_until(Delimiters::Braces);
        assert_eq!(scanned.text, " c}");
        assert!(cursor.at_end());
    }

    #[test]
    fn test_scan_until_end() {
        let mut cursor = Cursor::new("no delimiter");
        let scanned = cursor.scan_until(Delimiters::Braces);
        assert_eq!(scanned.delimiter, None);
        assert_eq!(scanned.body(), "no delimiter");
        assert_eq!(scanned.delimiter_offset(), 12);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_scan_until_escaped() {
        let mut cursor = Cursor::new(r"a\{b\}c}");
        let scanned = cursor.scan_until(Delimiters::Braces);
        assert_eq!(scanned.text, r"a\{b\}c}");
        assert_eq!(scanned.delimiter, Some(b'}'));

        let mut cursor = Cursor::new(r#"say \"hi\"" rest"#);
        let scanned = cursor.scan_until(Delimiters::Quoted);
        assert_eq!(scanned.body(), r#"say \"hi\""#);
        assert_eq!(cursor.rest(), " rest");

        // a trailing backslash escapes nothing
        let mut cursor = Cursor::new("a\\");
        assert_eq!(cursor.scan_until(Delimiters::Braces).delimiter, None);
    }

    #[test]
    fn test_scan_until_quoted() {
        let mut cursor = Cursor::new("ab\ncd\"");
        assert_eq!(cursor.scan_until(Delimiters::Quoted).delimiter, Some(b'\n'));
        assert_eq!(cursor.scan_until(Delimiters::Quoted).delimiter, Some(b'"'));

        let mut cursor = Cursor::new("x}\"");
        assert_eq!(cursor.scan_until(Delimiters::Quoted).delimiter, Some(b'}'));
    }

    #[test]
    fn test_scan_to_object_strict() {
        let mut cursor = Cursor::new("junk me@host\n@a");
        let start = cursor.scan_to_object(true);
        assert_eq!(start.meta, "junk me");
        assert_eq!(start.at, Some(7));
        assert_eq!(cursor.rest(), "host\n@a");

        let mut cursor = Cursor::new("only junk");
        let start = cursor.scan_to_object(true);
        assert_eq!(start.meta, "only junk");
        assert_eq!(start.at, None);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_scan_to_object_lenient() {
        let mut cursor = Cursor::new("email me@example.com\n  \t@book");
        let start = cursor.scan_to_object(false);
        assert_eq!(start.meta, "email me@example.com\n  \t");
        assert_eq!(start.at, Some(24));
        assert_eq!(cursor.rest(), "book");

        let mut cursor = Cursor::new("@first");
        assert_eq!(cursor.scan_to_object(false).at, Some(0));

        let mut cursor = Cursor::new("a@b");
        assert_eq!(cursor.scan_to_object(false).at, None);
    }
}
