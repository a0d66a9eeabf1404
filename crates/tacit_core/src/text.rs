//! Text span, range and line/column types for source location tracking.
//!
//! These types are used throughout the front end to track where tokens,
//! trivia and diagnostics originate in the source text.

use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }
}

/// A half-open text range with start and end positions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }
}

/// Line and column of a position in source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, counted in characters.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// The position reached after consuming `text` from this position.
    ///
    /// Without a newline the column grows by the character count of `text`.
    /// Otherwise the line grows by the number of newlines and the column
    /// restarts at the length of the text after the last one.
    pub fn advanced_by(self, text: &str) -> LineAndColumn {
        let bytes = text.as_bytes();
        match memchr::memrchr(b'\n', bytes) {
            None => LineAndColumn {
                line: self.line,
                character: self.character + text.chars().count() as u32,
            },
            Some(last) => LineAndColumn {
                line: self.line + memchr::memchr_iter(b'\n', bytes).count() as u32,
                character: text[last + 1..].chars().count() as u32,
            },
        }
    }
}

impl fmt::Display for LineAndColumn {
    /// Renders 1-based `line:column`, the way editors show positions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}
