//! Source positions: byte spans from the parser, line/column ranges for editors.

use std::fmt;

pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both are 0-indexed; columns count UTF-8 bytes from the start of the line.
/// Displayed 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// A half-open line/column range, the unit every definition, reference and
/// diagnostic is reported in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: LineCol,
    pub end: LineCol,
}

impl Range {
    #[inline]
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// Whether `pos` lies inside this range. The end position is inclusive so
    /// that a cursor placed right after an identifier still hits it.
    pub fn contains(&self, pos: LineCol) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Length of the indexed text.
    pub fn text_len(&self) -> TextSize {
        self.len
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let col = offset - self.line_starts[line];

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a byte span to a line/column range.
    ///
    /// Returns `None` when the span reaches past the end of the text.
    pub fn range(&self, range: TextRange) -> Option<Range> {
        if range.end() > self.len {
            return None;
        }
        Some(Range::new(
            self.line_col(range.start()),
            self.line_col(range.end()),
        ))
    }

    /// Convert a line/column position back to a byte offset.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line_start = self.line_starts.get(line_col.line as usize)?;
        let offset = TextSize::from(u32::from(*line_start).checked_add(line_col.col)?);
        (offset <= self.len).then_some(offset)
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::from(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[test]
    fn test_line_col_display() {
        assert_eq!(LineCol::new(0, 0).to_string(), "1:1");
        assert_eq!(LineCol::new(2, 7).to_string(), "3:8");
    }

    #[test]
    fn test_line_col_ordering() {
        assert!(LineCol::new(0, 9) < LineCol::new(1, 0));
        assert!(LineCol::new(1, 2) < LineCol::new(1, 3));
    }

    #[test]
    fn test_range_contains_is_end_inclusive() {
        let range = Range::new(LineCol::new(1, 4), LineCol::new(1, 8));

        assert!(range.contains(LineCol::new(1, 4)));
        assert!(range.contains(LineCol::new(1, 8)));
        assert!(!range.contains(LineCol::new(1, 9)));
        assert!(!range.contains(LineCol::new(0, 5)));
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("grammar G\n{\n  rules {}\n}");

        assert_eq!(index.len(), 4);
        assert_eq!(index.line_col(TextSize::from(8)), LineCol::new(0, 8));
        assert_eq!(index.line_col(TextSize::from(10)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(14)), LineCol::new(2, 2));
    }

    #[test]
    fn test_line_index_range() {
        let index = LineIndex::new("G {\n  A -> 'a';\n}");

        assert_eq!(
            index.range(span(6, 7)),
            Some(Range::new(LineCol::new(1, 2), LineCol::new(1, 3)))
        );
    }

    #[test]
    fn test_line_index_range_out_of_bounds() {
        let index = LineIndex::new("short");

        assert_eq!(index.range(span(2, 5)).map(|r| r.end), Some(LineCol::new(0, 5)));
        assert_eq!(index.range(span(2, 6)), None);
    }

    #[test]
    fn test_line_index_offset_roundtrip() {
        let index = LineIndex::new("ab\ncd");

        assert_eq!(index.offset(LineCol::new(1, 1)), Some(TextSize::from(4)));
        assert_eq!(index.offset(LineCol::new(2, 0)), None);
        assert_eq!(index.offset(LineCol::new(1, 9)), None);
    }

    #[test]
    fn test_line_index_offset_huge_column() {
        let index = LineIndex::new("ab\ncd");

        assert_eq!(index.offset(LineCol::new(1, u32::MAX)), None);
        assert_eq!(index.offset(LineCol::new(0, u32::MAX)), None);
    }
}
