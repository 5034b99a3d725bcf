use memchr::{memchr_iter, memrchr};
use serde::Serialize;

/// A 1-based line and column. Columns count chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl Default for LineColumn {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Compute the line and column of the byte `offset` in `source`.
///
/// An offset past the end of the source is clamped to the source length.
pub fn line_column(source: &str, offset: usize) -> LineColumn {
    let offset = offset.min(source.len());
    let head = &source.as_bytes()[..offset];

    let line = memchr_iter(b'\n', head).count() + 1;
    let line_start = memrchr(b'\n', head).map_or(0, |idx| idx + 1);

    // count chars by their leading bytes
    let column = head[line_start..]
        .iter()
        .filter(|b| (**b & 0xC0) != 0x80)
        .count()
        + 1;

    LineColumn { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("", 0), LineColumn::default());
        assert_eq!(line_column("abc", 2), LineColumn { line: 1, column: 3 });
        assert_eq!(line_column("a\nbc", 2), LineColumn { line: 2, column: 1 });
        assert_eq!(line_column("a\nbc", 3), LineColumn { line: 2, column: 2 });
        assert_eq!(line_column("a\n\n", 3), LineColumn { line: 3, column: 1 });
        assert_eq!(line_column("abc", 99), LineColumn { line: 1, column: 4 });
    }

    #[test]
    fn test_line_column_unicode() {
        // 🍄 is four bytes
        assert_eq!(line_column("🍄@", 4), LineColumn { line: 1, column: 2 });
        assert_eq!(line_column("é\n🍄🍄", 7), LineColumn { line: 2, column: 2 });
    }
}
