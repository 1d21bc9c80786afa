//! Line/column to byte-offset conversion.
//!
//! Built once per source string and shared by every registration against
//! that string. Each of `\n`, `\r`, `\r\n` and `\n\r` terminates one line;
//! columns are byte columns within the line.

use text_size::TextSize;

use super::{Position, Span};

/// Byte offsets of the line starts of one source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![TextSize::new(0)];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                    line_starts.push(TextSize::new(i as u32));
                }
                b'\n' => {
                    i += if bytes.get(i + 1) == Some(&b'\r') { 2 } else { 1 };
                    line_starts.push(TextSize::new(i as u32));
                }
                _ => i += 1,
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of a 1-based position.
    ///
    /// Returns `None` for the unknown sentinel coordinates and for lines
    /// past the end of the text.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        if position.line == 0 || position.column == 0 {
            return None;
        }
        let line_start = *self.line_starts.get(position.line - 1)?;
        Some(line_start + TextSize::new((position.column - 1) as u32))
    }

    /// The 1-based position of a byte offset.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let column = offset - self.line_starts[line - 1];
        Position::new(line, usize::from(column) + 1)
    }

    /// The exact substring of `text` covered by `span` (inclusive end).
    ///
    /// `text` must be the string this index was built from. Returns `None`
    /// when the span does not address valid offsets in the text.
    pub fn slice<'a>(&self, text: &'a str, span: Span) -> Option<&'a str> {
        let start = usize::from(self.offset(span.begin)?);
        let end = usize::from(self.offset(span.end)?) + 1;
        text.get(start..end)
    }
}
