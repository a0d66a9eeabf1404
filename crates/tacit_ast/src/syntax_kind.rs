//! Token kinds and grammar rule kinds.

use serde::Serialize;
use std::fmt;

/// The kind of a token. This set is closed; the camelCase spelling returned by
/// [`TokenKind::as_str`] is what other tools match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    // Literals
    String,
    StringStart,
    StringPart,
    StringEnd,
    Number,
    Character,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenSquare,
    CloseSquare,
    Equal,
    Tilde,
    Semicolon,
    Colon,
    QuestionMark,

    // Names
    VariableName,
    BinaryOperatorName,
    PostfixOperatorName,
}

impl TokenKind {
    pub const ALL: [TokenKind; 20] = [
        TokenKind::String,
        TokenKind::StringStart,
        TokenKind::StringPart,
        TokenKind::StringEnd,
        TokenKind::Number,
        TokenKind::Character,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenCurly,
        TokenKind::CloseCurly,
        TokenKind::OpenSquare,
        TokenKind::CloseSquare,
        TokenKind::Equal,
        TokenKind::Tilde,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::QuestionMark,
        TokenKind::VariableName,
        TokenKind::BinaryOperatorName,
        TokenKind::PostfixOperatorName,
    ];

    /// The exact spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::StringStart => "stringStart",
            TokenKind::StringPart => "stringPart",
            TokenKind::StringEnd => "stringEnd",
            TokenKind::Number => "number",
            TokenKind::Character => "character",
            TokenKind::OpenParen => "openParen",
            TokenKind::CloseParen => "closeParen",
            TokenKind::OpenCurly => "openCurly",
            TokenKind::CloseCurly => "closeCurly",
            TokenKind::OpenSquare => "openSquare",
            TokenKind::CloseSquare => "closeSquare",
            TokenKind::Equal => "equal",
            TokenKind::Tilde => "tilde",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Colon => "colon",
            TokenKind::QuestionMark => "questionMark",
            TokenKind::VariableName => "variableName",
            TokenKind::BinaryOperatorName => "binaryOperatorName",
            TokenKind::PostfixOperatorName => "postfixOperatorName",
        }
    }

    /// The fixed source text of a punctuation token.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenCurly => Some("{"),
            TokenKind::CloseCurly => Some("}"),
            TokenKind::OpenSquare => Some("["),
            TokenKind::CloseSquare => Some("]"),
            TokenKind::Equal => Some("="),
            TokenKind::Tilde => Some("~"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Colon => Some(":"),
            TokenKind::QuestionMark => Some("?"),
            _ => None,
        }
    }

    /// Map a punctuation character to its token kind.
    pub fn from_punctuation(ch: char) -> Option<TokenKind> {
        Some(match ch {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            '[' => TokenKind::OpenSquare,
            ']' => TokenKind::CloseSquare,
            '=' => TokenKind::Equal,
            '~' => TokenKind::Tilde,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '?' => TokenKind::QuestionMark,
            _ => return None,
        })
    }

    /// How this kind is named in "expected" diagnostics.
    pub fn describe(self) -> &'static str {
        self.punctuation_text().unwrap_or_else(|| self.as_str())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The grammar rules that record a node in the concrete syntax tree.
///
/// `primary`, `literal` and `nonVariable` only dispatch between alternatives
/// and therefore have no kind of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Program,
    Expression,
    Term,
    Ternary,
    Parenthesized,
    Assignment,
    VariableReference,
    FunctionLiteral,
    ArrayLiteral,
    NumberLiteral,
    StringLiteral,
    InterpolatedStringLiteral,
    CharacterLiteral,
    Implicit,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Program => "program",
            RuleKind::Expression => "expression",
            RuleKind::Term => "term",
            RuleKind::Ternary => "ternary",
            RuleKind::Parenthesized => "parenthesized",
            RuleKind::Assignment => "assignment",
            RuleKind::VariableReference => "variableReference",
            RuleKind::FunctionLiteral => "functionLiteral",
            RuleKind::ArrayLiteral => "arrayLiteral",
            RuleKind::NumberLiteral => "numberLiteral",
            RuleKind::StringLiteral => "stringLiteral",
            RuleKind::InterpolatedStringLiteral => "interpolatedStringLiteral",
            RuleKind::CharacterLiteral => "characterLiteral",
            RuleKind::Implicit => "implicit",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
