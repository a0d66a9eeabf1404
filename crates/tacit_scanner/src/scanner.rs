//! The tacit scanner.
//!
//! At each position a fixed, priority-ordered list of anchored recognizers is
//! tried; the first match becomes one token. String literals are scanned by
//! hand because an unescaped `$` inside them opens an interpolation whose
//! contents are tokenized as ordinary source.

use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;
use tacit_ast::token::Token;
use tacit_ast::TokenKind;
use tacit_core::text::{LineAndColumn, TextPos, TextRange};
use tacit_diagnostics::LexError;

use crate::char_codes::*;
use crate::token::{ScanResult, Trivia, TriviaKind};

/// Tokenize `text` in one go.
pub fn tokenize(text: &str) -> Result<ScanResult, LexError> {
    Scanner::new(text).scan_all()
}

// ============================================================================
// Recognizers
// ============================================================================

enum Recognizer {
    Pattern(TokenKind, Regex),
    /// The single-character punctuation set.
    Punctuation,
}

impl Recognizer {
    fn recognize(&self, rest: &str) -> Option<(TokenKind, usize)> {
        match self {
            Recognizer::Pattern(kind, pattern) => pattern.find(rest).map(|m| (*kind, m.end())),
            Recognizer::Punctuation => {
                let ch = rest.chars().next()?;
                TokenKind::from_punctuation(ch).map(|kind| (kind, ch.len_utf8()))
            }
        }
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("token pattern is a valid regex")
}

/// Token recognizers in priority order. String literals are handled before
/// these are consulted.
fn token_recognizers() -> &'static [Recognizer] {
    static RECOGNIZERS: OnceLock<Vec<Recognizer>> = OnceLock::new();
    RECOGNIZERS.get_or_init(|| {
        vec![
            Recognizer::Pattern(TokenKind::Number, pattern(r"\A_?[0-9][0-9_]*(?:\.[0-9][0-9_]*)?")),
            Recognizer::Pattern(TokenKind::Character, pattern(r"\A'(?s:.)")),
            Recognizer::Punctuation,
            Recognizer::Pattern(
                TokenKind::BinaryOperatorName,
                pattern(r"\A(?:b[&|^<>]|eq|nq|[|&<>+\-*%/\\`^.@$,])"),
            ),
            Recognizer::Pattern(TokenKind::PostfixOperatorName, pattern(r"\A(?:[a-z]{1,2}|!)")),
            Recognizer::Pattern(TokenKind::VariableName, pattern(r"\A[A-Z][A-Z0-9_]*")),
        ]
    })
}

fn trivia_recognizers() -> &'static [(TriviaKind, Regex)] {
    static RECOGNIZERS: OnceLock<Vec<(TriviaKind, Regex)>> = OnceLock::new();
    RECOGNIZERS.get_or_init(|| {
        vec![
            (TriviaKind::Whitespace, pattern(r"\A\s+")),
            (TriviaKind::Comment, pattern(r"\A#[^\n]*")),
        ]
    })
}

// ============================================================================
// Scanner
// ============================================================================

/// Where an interpolation was opened, for reporting an unterminated one.
#[derive(Clone, Copy)]
struct OpenInterpolation {
    offset: TextPos,
    position: LineAndColumn,
}

/// Converts tacit source text into tokens.
pub struct Scanner<'s> {
    /// The source text being scanned.
    text: &'s str,
    /// Current byte offset in the text.
    pos: usize,
    /// Line and column of `pos`.
    position: LineAndColumn,
    tokens: Vec<Token>,
    trivia: Vec<Trivia>,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            pos: 0,
            position: LineAndColumn::default(),
            tokens: Vec::new(),
            trivia: Vec::new(),
        }
    }

    /// Scan the entire text.
    pub fn scan_all(mut self) -> Result<ScanResult, LexError> {
        self.scan_tokens(None)?;
        debug!(
            "scanned {} tokens and {} trivia from {} bytes",
            self.tokens.len(),
            self.trivia.len(),
            self.text.len()
        );
        Ok(ScanResult {
            tokens: self.tokens,
            trivia: self.trivia,
        })
    }

    #[inline]
    fn rest(&self) -> &'s str {
        &self.text[self.pos..]
    }

    /// Scan tokens until end of input, or, inside an interpolation, until the
    /// closing `$` (which is left unconsumed).
    fn scan_tokens(&mut self, interpolation: Option<OpenInterpolation>) -> Result<(), LexError> {
        loop {
            let rest = self.rest();
            let Some(&first) = rest.as_bytes().first() else {
                return match interpolation {
                    Some(open) => Err(LexError::unterminated_interpolation(open.offset, open.position)),
                    None => Ok(()),
                };
            };

            if first == DOLLAR_SIGN && interpolation.is_some() {
                return Ok(());
            }
            if first == DOUBLE_QUOTE {
                self.scan_string_literal()?;
                continue;
            }
            if let Some((kind, len)) = token_recognizers().iter().find_map(|r| r.recognize(rest)) {
                self.push_token(kind, len);
                continue;
            }
            if let Some((kind, len)) = trivia_recognizers()
                .iter()
                .find_map(|(kind, re)| re.find(rest).map(|m| (*kind, m.end())))
            {
                self.push_trivia(kind, len);
                continue;
            }
            return Err(LexError::unexpected_character(self.pos as TextPos, self.position, rest));
        }
    }

    /// Scan a string literal starting at the opening quote.
    ///
    /// Without interpolation this yields one `string` token. Otherwise it
    /// yields `stringStart`, the embedded tokens, then `stringPart` segments
    /// between further interpolations and a final `stringEnd`.
    fn scan_string_literal(&mut self) -> Result<(), LexError> {
        let open_offset = self.pos as TextPos;
        let open_position = self.position;
        let mut interpolated = false;
        let mut i = self.pos + 1;

        loop {
            let Some(&byte) = self.text.as_bytes().get(i) else {
                return Err(LexError::unterminated_string(open_offset, open_position));
            };
            match byte {
                BACKSLASH => {
                    let escaped = self.text[i + 1..].chars().next().map_or(0, char::len_utf8);
                    i += 1 + escaped;
                }
                DOUBLE_QUOTE => {
                    let kind = if interpolated { TokenKind::StringEnd } else { TokenKind::String };
                    self.push_token(kind, i + 1 - self.pos);
                    return Ok(());
                }
                DOLLAR_SIGN => {
                    let kind = if interpolated { TokenKind::StringPart } else { TokenKind::StringStart };
                    let open = OpenInterpolation {
                        offset: i as TextPos,
                        position: self.position.advanced_by(&self.text[self.pos..i]),
                    };
                    self.push_token(kind, i + 1 - self.pos);
                    self.scan_tokens(Some(open))?;
                    // Now at the closing `$`, which starts the next segment.
                    interpolated = true;
                    i = self.pos + 1;
                }
                _ => i += 1,
            }
        }
    }

    fn push_token(&mut self, kind: TokenKind, len: usize) {
        let image = &self.text[self.pos..self.pos + len];
        let token = Token::new(kind, image, self.pos as TextPos, self.position);
        trace!("{} {:?} at {}", kind, image, self.position);
        self.advance(len);
        self.tokens.push(token);
    }

    fn push_trivia(&mut self, kind: TriviaKind, len: usize) {
        let start = self.pos;
        let text = &self.text[start..start + len];
        self.trivia.push(Trivia {
            kind,
            text: text.to_string(),
            range: TextRange::new(start as TextPos, (start + len) as TextPos),
        });
        self.advance(len);
    }

    fn advance(&mut self, len: usize) {
        self.position = self.position.advanced_by(&self.text[self.pos..self.pos + len]);
        self.pos += len;
    }
}
