//! Abstract syntax tree definitions.
//!
//! AST nodes keep only semantic content: punctuation is dropped and every
//! node owns its children outright.

use serde::Serialize;

// ============================================================================
// Program
// ============================================================================

/// The root of a parse: the `;`-separated statements of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "program")]
pub struct Program {
    pub body: Vec<Expression>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expression {
    BinaryOp {
        op: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    PostfixOp {
        op: String,
        argument: Box<Expression>,
    },
    /// `condition ? when_true : when_false`.
    Ternary {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    /// `NAME = value`, or `NAME op= value` with a modifier operator.
    Assignment {
        name: String,
        modifier: Option<String>,
        value: Box<Expression>,
    },
    VariableReference {
        name: String,
    },
    /// `~op`: an operator used as a value.
    OperatorReference {
        op: String,
    },
    NumberLiteral {
        image: String,
    },
    /// Content between the quotes, escapes left as written.
    StringLiteral {
        image: String,
    },
    /// Alternating text and embedded expressions, starting and ending with text.
    InterpolatedString {
        parts: Vec<InterpolationPart>,
    },
    /// The character after the `'`.
    CharacterLiteral {
        image: String,
    },
    FunctionLiteral {
        body: Vec<Expression>,
    },
    ArrayLiteral {
        values: Vec<Expression>,
    },
    Parenthesized {
        inner: Box<Expression>,
    },
    /// Stands for an operand that was not written.
    Implicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InterpolationPart {
    Text { text: String },
    Embedded { expression: Expression },
}

impl Expression {
    pub fn binary(op: impl Into<String>, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn postfix(op: impl Into<String>, argument: Expression) -> Self {
        Expression::PostfixOp {
            op: op.into(),
            argument: Box::new(argument),
        }
    }

    pub fn ternary(condition: Expression, when_true: Expression, when_false: Expression) -> Self {
        Expression::Ternary {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    pub fn assignment(name: impl Into<String>, modifier: Option<&str>, value: Expression) -> Self {
        Expression::Assignment {
            name: name.into(),
            modifier: modifier.map(str::to_owned),
            value: Box::new(value),
        }
    }

    pub fn number(image: impl Into<String>) -> Self {
        Expression::NumberLiteral { image: image.into() }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::VariableReference { name: name.into() }
    }

    pub fn parenthesized(inner: Expression) -> Self {
        Expression::Parenthesized { inner: Box::new(inner) }
    }

    /// The kind tag, as it appears in JSON dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::BinaryOp { .. } => "binaryOp",
            Expression::PostfixOp { .. } => "postfixOp",
            Expression::Ternary { .. } => "ternary",
            Expression::Assignment { .. } => "assignment",
            Expression::VariableReference { .. } => "variableReference",
            Expression::OperatorReference { .. } => "operatorReference",
            Expression::NumberLiteral { .. } => "numberLiteral",
            Expression::StringLiteral { .. } => "stringLiteral",
            Expression::InterpolatedString { .. } => "interpolatedString",
            Expression::CharacterLiteral { .. } => "characterLiteral",
            Expression::FunctionLiteral { .. } => "functionLiteral",
            Expression::ArrayLiteral { .. } => "arrayLiteral",
            Expression::Parenthesized { .. } => "parenthesized",
            Expression::Implicit => "implicit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_tags() {
        let expr = Expression::ternary(
            Expression::binary("<", Expression::variable("A"), Expression::number("1")),
            Expression::postfix("sz", Expression::Implicit),
            Expression::assignment("B", Some("+"), Expression::number("2")),
        );
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["kind"], "ternary");
        assert_eq!(json["condition"]["kind"], "binaryOp");
        assert_eq!(json["condition"]["op"], "<");
        assert_eq!(json["whenTrue"]["argument"]["kind"], "implicit");
        assert_eq!(json["whenFalse"]["modifier"], "+");
    }

    #[test]
    fn test_program_and_interpolation_json() {
        let program = Program {
            body: vec![Expression::InterpolatedString {
                parts: vec![
                    InterpolationPart::Text { text: "a".into() },
                    InterpolationPart::Embedded { expression: Expression::number("1") },
                    InterpolationPart::Text { text: String::new() },
                ],
            }],
        };
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["kind"], "program");
        assert_eq!(json["body"][0]["kind"], "interpolatedString");
        assert_eq!(json["body"][0]["parts"][1]["kind"], "embedded");
        assert_eq!(json["body"][0]["parts"][1]["expression"]["image"], "1");
    }

    #[test]
    fn test_kind_name_matches_json_tag() {
        let samples = vec![
            Expression::Implicit,
            Expression::number("3"),
            Expression::parenthesized(Expression::variable("X")),
            Expression::OperatorReference { op: "+".into() },
            Expression::FunctionLiteral { body: vec![] },
        ];
        for expr in samples {
            let json = serde_json::to_value(&expr).unwrap();
            assert_eq!(json["kind"], expr.kind_name());
        }
    }
}
