//! Positioned tokens produced by the scanner.

use crate::syntax_kind::TokenKind;
use serde::Serialize;
use tacit_core::text::{LineAndColumn, TextPos, TextRange};

/// An immutable token: its kind, the exact source substring, and where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub image: String,
    /// Byte offset of the first character.
    pub start_index: TextPos,
    /// Byte offset one past the last character.
    pub end_index: TextPos,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl Token {
    /// Create a token starting at `start_index`/`start`; the end position is
    /// derived from the image.
    pub fn new(kind: TokenKind, image: impl Into<String>, start_index: TextPos, start: LineAndColumn) -> Self {
        let image = image.into();
        let end = start.advanced_by(&image);
        Self {
            kind,
            end_index: start_index + image.len() as TextPos,
            image,
            start_index,
            start_line: start.line,
            end_line: end.line,
            start_column: start.character,
            end_column: end.character,
        }
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start_index, self.end_index)
    }

    #[inline]
    pub fn start(&self) -> LineAndColumn {
        LineAndColumn::new(self.start_line, self.start_column)
    }

    #[inline]
    pub fn end(&self) -> LineAndColumn {
        LineAndColumn::new(self.end_line, self.end_column)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
