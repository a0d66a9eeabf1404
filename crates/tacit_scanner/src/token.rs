//! Scanner output: tokens plus the trivia skipped between them.

use serde::Serialize;
use tacit_ast::token::Token;
use tacit_ast::TokenKind;
use tacit_core::text::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TriviaKind {
    Whitespace,
    /// A `#` comment running to the end of the line.
    Comment,
}

/// Source text skipped by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
    #[serde(skip)]
    pub range: TextRange,
}

/// The result of tokenizing one source text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub trivia: Vec<Trivia>,
}

impl ScanResult {
    /// Token kinds in order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Rebuild the source by re-inserting trivia between token images at
    /// their recorded offsets.
    pub fn reconstruct(&self) -> String {
        let mut pieces: Vec<(u32, &str)> = self
            .tokens
            .iter()
            .map(|t| (t.start_index, t.image.as_str()))
            .chain(self.trivia.iter().map(|t| (t.range.pos, t.text.as_str())))
            .collect();
        pieces.sort_by_key(|(start, _)| *start);
        pieces.into_iter().map(|(_, text)| text).collect()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
