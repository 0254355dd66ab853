//! Caret and selection.

use std::ops::Range;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Selection range in character offsets.
///
/// `anchor` stays fixed while extending; `head` is where the caret is drawn. A selection with
/// `anchor == head` is an empty selection, i.e. a bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Fixed end.
    pub anchor: usize,
    /// Moving end (the caret).
    pub head: usize,
}

impl Selection {
    /// A bare caret at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// A selection from `anchor` to `head`.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Returns `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Lower bound.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound (exclusive).
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Ordered character range.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Clamp both ends to a document of `len` characters.
    pub fn clamped(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}
