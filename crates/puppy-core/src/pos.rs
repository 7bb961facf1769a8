//! Source positions for diagnostics and suspension traces.
//!
//! Provides [`Pos`], the position a parse-tree node reports for itself.

use std::fmt;

/// Position of a parse-tree node in the source text.
///
/// `line` is the raw line number supplied by the parser (1-indexed).
/// `column` is the parser's column marker; `-1` means the marker is absent,
/// in which case the parser has already advanced `line` past the node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Absolute byte offset in the source text.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column marker, `-1` when absent.
    pub column: i32,
}

impl Pos {
    /// Create a position from an offset, line and column marker.
    #[inline]
    pub fn new(offset: usize, line: u32, column: i32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of a line.
    #[inline]
    pub fn line(line: u32) -> Self {
        Self {
            offset: 0,
            line,
            column: 0,
        }
    }

    /// Whether the column marker is absent.
    #[inline]
    pub fn column_missing(&self) -> bool {
        self.column == -1
    }

    /// Zero-based editor row for this position.
    ///
    /// Subtracts 1 from the raw line, or 2 when the column marker is absent.
    pub fn row(&self) -> u32 {
        if self.column_missing() {
            self.line.saturating_sub(2)
        } else {
            self.line.saturating_sub(1)
        }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::line(1)
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
