//! tacit_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every message the scanner and parser can emit lives in the [`messages`]
//! catalogue with a stable numeric code. The two terminal error kinds,
//! [`LexError`] and [`ParseError`], carry the offending offset and
//! line/column and render through `miette` with a labelled source span.

use miette::{Diagnostic, SourceSpan};
use tacit_core::text::{LineAndColumn, TextPos, TextSpan};
use thiserror::Error;

/// A diagnostic message template with a code.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 1001, 2001).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Resolve the template against `args`.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

fn source_span(span: TextSpan) -> SourceSpan {
    (span.start as usize, span.length as usize).into()
}

// ============================================================================
// Lexing errors
// ============================================================================

/// Why the scanner gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No recognizer matched; `remaining` is the unconsumed input (truncated).
    UnexpectedCharacter { remaining: String },
    /// End of input inside a string literal.
    UnterminatedString,
    /// End of input inside a `$...$` interpolation.
    UnterminatedInterpolation,
}

/// A fatal tokenization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tacit::lex))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub code: u32,
    /// Byte offset of the failure.
    pub offset: TextPos,
    pub position: LineAndColumn,
    #[label("here")]
    pub span: SourceSpan,
}

/// Longest slice of unconsumed input quoted in an unexpected-character message.
const MAX_REMAINING_PREVIEW: usize = 32;

impl LexError {
    pub fn unexpected_character(offset: TextPos, position: LineAndColumn, rest: &str) -> Self {
        let remaining: String = rest.chars().take(MAX_REMAINING_PREVIEW).collect();
        let width = rest.chars().next().map_or(0, char::len_utf8) as TextPos;
        Self::new(
            &messages::UNEXPECTED_CHARACTER,
            &[remaining.as_str()],
            LexErrorKind::UnexpectedCharacter { remaining: remaining.clone() },
            offset,
            position,
            width,
        )
    }

    pub fn unterminated_string(offset: TextPos, position: LineAndColumn) -> Self {
        Self::new(
            &messages::UNTERMINATED_STRING_LITERAL,
            &[],
            LexErrorKind::UnterminatedString,
            offset,
            position,
            1,
        )
    }

    pub fn unterminated_interpolation(offset: TextPos, position: LineAndColumn) -> Self {
        Self::new(
            &messages::UNTERMINATED_INTERPOLATION,
            &[],
            LexErrorKind::UnterminatedInterpolation,
            offset,
            position,
            1,
        )
    }

    fn new(
        message: &DiagnosticMessage,
        args: &[&str],
        kind: LexErrorKind,
        offset: TextPos,
        position: LineAndColumn,
        length: TextPos,
    ) -> Self {
        Self {
            kind,
            message: message.format(args),
            code: message.code,
            offset,
            position,
            span: source_span(TextSpan::new(offset, length)),
        }
    }
}

// ============================================================================
// Parsing errors
// ============================================================================

/// Why a grammar rule failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required token was absent. `found` is `None` at end of input.
    Expected { expected: String, found: Option<String> },
    /// Every alternative of an ordered choice failed without consuming input.
    NoAlternative { rule: String },
    /// Operator reduction left other than exactly one operand.
    MalformedExpression { operands: usize },
    /// Tokens remained after the top-level program.
    TrailingTokens { found: String },
    /// Nesting exceeded the configured limit.
    NestingTooDeep { limit: u32 },
    /// A binary operator with no precedence level.
    UnknownOperator { op: String },
}

/// A grammar failure. Inside the parser these drive backtracking; only the
/// one that escapes the top-level rule reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tacit::parse))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub code: u32,
    /// Byte offset of the token the failure was detected at.
    pub offset: TextPos,
    pub position: LineAndColumn,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        offset: TextPos,
        position: LineAndColumn,
        length: TextPos,
    ) -> Self {
        let (message, code) = match &kind {
            ParseErrorKind::Expected { expected, found: Some(found) } => (
                messages::_0_EXPECTED_FOUND_1.format(&[expected.as_str(), found.as_str()]),
                messages::_0_EXPECTED_FOUND_1.code,
            ),
            ParseErrorKind::Expected { expected, found: None } => (
                messages::_0_EXPECTED_AT_END_OF_INPUT.format(&[expected.as_str()]),
                messages::_0_EXPECTED_AT_END_OF_INPUT.code,
            ),
            ParseErrorKind::NoAlternative { rule } => (
                messages::NO_ALTERNATIVE_OF_0_MATCHED.format(&[rule.as_str()]),
                messages::NO_ALTERNATIVE_OF_0_MATCHED.code,
            ),
            ParseErrorKind::MalformedExpression { operands } => (
                messages::MALFORMED_EXPRESSION_0_OPERANDS.format(&[operands.to_string().as_str()]),
                messages::MALFORMED_EXPRESSION_0_OPERANDS.code,
            ),
            ParseErrorKind::TrailingTokens { found } => (
                messages::UNEXPECTED_0_AFTER_END_OF_PROGRAM.format(&[found.as_str()]),
                messages::UNEXPECTED_0_AFTER_END_OF_PROGRAM.code,
            ),
            ParseErrorKind::NestingTooDeep { limit } => (
                messages::NESTING_EXCEEDS_LIMIT_OF_0.format(&[limit.to_string().as_str()]),
                messages::NESTING_EXCEEDS_LIMIT_OF_0.code,
            ),
            ParseErrorKind::UnknownOperator { op } => (
                messages::UNKNOWN_BINARY_OPERATOR_0.format(&[op.as_str()]),
                messages::UNKNOWN_BINARY_OPERATOR_0.code,
            ),
        };
        Self {
            kind,
            message,
            code,
            offset,
            position,
            span: source_span(TextSpan::new(offset, length)),
        }
    }

    /// Fatal errors abort the whole parse instead of triggering backtracking.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ParseErrorKind::NestingTooDeep { .. })
    }
}

// ============================================================================
// Combined front-end error
// ============================================================================

/// The single terminal error of a failed tokenize-and-parse run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn offset(&self) -> TextPos {
        match self {
            SyntaxError::Lex(e) => e.offset,
            SyntaxError::Parse(e) => e.offset,
        }
    }

    pub fn position(&self) -> LineAndColumn {
        match self {
            SyntaxError::Lex(e) => e.position,
            SyntaxError::Parse(e) => e.position,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            SyntaxError::Lex(e) => e.code,
            SyntaxError::Parse(e) => e.code,
        }
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // Scanner errors (1000-1099)
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, "Error in lexing, remaining code is: {0}");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, "Unterminated string literal.");
    pub const UNTERMINATED_INTERPOLATION: DiagnosticMessage = diag!(1003, "Unterminated string interpolation; expected a closing '$'.");

    // Parser errors (2000-2099)
    pub const _0_EXPECTED_FOUND_1: DiagnosticMessage = diag!(2001, "'{0}' expected, found '{1}'.");
    pub const _0_EXPECTED_AT_END_OF_INPUT: DiagnosticMessage = diag!(2002, "'{0}' expected at end of input.");
    pub const NO_ALTERNATIVE_OF_0_MATCHED: DiagnosticMessage = diag!(2003, "No alternative of '{0}' matched.");
    pub const MALFORMED_EXPRESSION_0_OPERANDS: DiagnosticMessage = diag!(2004, "Malformed expression: {0} operands remained after reduction.");
    pub const UNEXPECTED_0_AFTER_END_OF_PROGRAM: DiagnosticMessage = diag!(2005, "Unexpected '{0}' after end of program.");
    pub const NESTING_EXCEEDS_LIMIT_OF_0: DiagnosticMessage = diag!(2006, "Expression nesting exceeds the limit of {0}.");
    pub const UNKNOWN_BINARY_OPERATOR_0: DiagnosticMessage = diag!(2007, "Unknown binary operator '{0}'.");
}
