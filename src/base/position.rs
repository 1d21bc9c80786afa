//! Position tracking for tree nodes.
//!
//! Stores the source location (line/column) of nodes so the
//! lexical-preserving printer can map every node back to the exact bytes
//! it covers.

/// A span covering a range of source code, inclusive on both ends
///
/// `begin` addresses the first byte of the covered text and `end` the last
/// one. Synthetic nodes that were never parsed carry [`Span::UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

/// A position in source code (1-based line and column)
///
/// Totally ordered lexicographically: first by line, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Sentinel for synthetically-constructed nodes with no source text.
    pub const UNKNOWN: Span = Span {
        begin: Position { line: 0, column: 0 },
        end: Position { line: 0, column: 0 },
    };

    pub fn new(begin: Position, end: Position) -> Self {
        debug_assert!(begin <= end, "span begin {begin:?} after end {end:?}");
        Self { begin, end }
    }

    /// Create a span from 1-based line/column coordinates
    pub fn from_coords(
        begin_line: usize,
        begin_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self::new(
            Position::new(begin_line, begin_col),
            Position::new(end_line, end_col),
        )
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.begin.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.begin.line && position.column < self.begin.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
