//! The tacit grammar.
//!
//! ```text
//! program       := expression (';' expression)*
//! expression    := primary postfixOp* (binaryOp primary postfixOp* | ternary)*
//! ternary       := '?' term ':' term
//! term          := primary postfixOp*
//! primary       := parenthesized | assignment | variableReference | literal | implicit
//! assignment    := VARNAME nonVariable? '=' expression
//! variableRef   := VARNAME | '~' nonVariable
//! literal       := function | array | number | string | interpolatedString | character
//! ```
//!
//! `primary`, `literal` and `nonVariable` are pure choices and leave no CST
//! node of their own.

use tacit_ast::{Expression, InterpolationPart, Program, RuleKind, TokenKind};
use tacit_diagnostics::ParseErrorKind;

use crate::parser::{error_at_token, ParseResult, Parser};
use crate::precedence::{resolve, ExprItem, ResolveError};

impl Parser {
    pub(crate) fn program_body(&mut self) -> ParseResult<Program> {
        let body = self.statement_list()?;
        Ok(Program { body })
    }

    /// The `;`-separated expressions of a program, function or array body.
    fn statement_list(&mut self) -> ParseResult<Vec<Expression>> {
        self.many_separated(TokenKind::Semicolon, true, Self::expression)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub(crate) fn expression(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::Expression, |p| {
            let mut items = vec![ExprItem::Operand(p.primary()?)];
            items.extend(p.many(false, Self::postfix_operator)?);
            for continuation in p.many(false, Self::continuation)? {
                items.extend(continuation);
            }
            p.resolve_items(items)
        })
    }

    fn continuation(&mut self) -> ParseResult<Vec<ExprItem>> {
        self.or("expression", &[Self::binary_continuation, Self::ternary_continuation])
    }

    fn binary_continuation(&mut self) -> ParseResult<Vec<ExprItem>> {
        let op = self.consume(TokenKind::BinaryOperatorName)?;
        let mut items = vec![ExprItem::Binary(op), ExprItem::Operand(self.primary()?)];
        items.extend(self.many(false, Self::postfix_operator)?);
        Ok(items)
    }

    fn ternary_continuation(&mut self) -> ParseResult<Vec<ExprItem>> {
        let (when_true, when_false) = self.rule(RuleKind::Ternary, |p| {
            p.consume(TokenKind::QuestionMark)?;
            let when_true = p.term()?;
            p.consume(TokenKind::Colon)?;
            let when_false = p.term()?;
            Ok((when_true, when_false))
        })?;
        Ok(vec![ExprItem::Ternary { when_true, when_false }])
    }

    fn term(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::Term, |p| {
            let mut items = vec![ExprItem::Operand(p.primary()?)];
            items.extend(p.many(false, Self::postfix_operator)?);
            p.resolve_items(items)
        })
    }

    fn postfix_operator(&mut self) -> ParseResult<ExprItem> {
        self.consume(TokenKind::PostfixOperatorName).map(ExprItem::Postfix)
    }

    fn resolve_items(&self, items: Vec<ExprItem>) -> ParseResult<Expression> {
        resolve(items).map_err(|err| match err {
            ResolveError::UnknownOperator(token) => {
                error_at_token(ParseErrorKind::UnknownOperator { op: token.image.clone() }, &token)
            }
            ResolveError::Malformed { operands } => {
                self.error_here(ParseErrorKind::MalformedExpression { operands })
            }
        })
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn primary(&mut self) -> ParseResult<Expression> {
        self.or(
            "primary",
            &[
                Self::parenthesized,
                Self::assignment,
                Self::variable_reference,
                Self::literal,
                Self::implicit,
            ],
        )
    }

    fn parenthesized(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::Parenthesized, |p| {
            p.consume(TokenKind::OpenParen)?;
            let inner = p.expression()?;
            p.consume(TokenKind::CloseParen)?;
            Ok(Expression::parenthesized(inner))
        })
    }

    fn assignment(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::Assignment, |p| {
            let name = p.consume(TokenKind::VariableName)?;
            let modifier = p.optional(Self::non_variable)?;
            p.consume(TokenKind::Equal)?;
            let value = p.expression()?;
            Ok(Expression::assignment(name.image, modifier.as_deref(), value))
        })
    }

    fn variable_reference(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::VariableReference, |p| {
            p.or("variableReference", &[Self::variable_name, Self::operator_reference])
        })
    }

    fn variable_name(&mut self) -> ParseResult<Expression> {
        let name = self.consume(TokenKind::VariableName)?;
        Ok(Expression::variable(name.image))
    }

    fn operator_reference(&mut self) -> ParseResult<Expression> {
        self.consume(TokenKind::Tilde)?;
        let op = self.non_variable()?;
        Ok(Expression::OperatorReference { op })
    }

    /// Any operator name, used where an operator stands in for a value.
    fn non_variable(&mut self) -> ParseResult<String> {
        self.or("nonVariable", &[Self::binary_operator_name, Self::postfix_operator_name])
    }

    fn binary_operator_name(&mut self) -> ParseResult<String> {
        self.consume(TokenKind::BinaryOperatorName).map(|token| token.image)
    }

    fn postfix_operator_name(&mut self) -> ParseResult<String> {
        self.consume(TokenKind::PostfixOperatorName).map(|token| token.image)
    }

    fn implicit(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::Implicit, |_| Ok(Expression::Implicit))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn literal(&mut self) -> ParseResult<Expression> {
        self.or(
            "literal",
            &[
                Self::function_literal,
                Self::array_literal,
                Self::number_literal,
                Self::string_literal,
                Self::interpolated_string_literal,
                Self::character_literal,
            ],
        )
    }

    fn function_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::FunctionLiteral, |p| {
            p.consume(TokenKind::OpenCurly)?;
            let body = p.statement_list()?;
            p.consume(TokenKind::CloseCurly)?;
            Ok(Expression::FunctionLiteral { body })
        })
    }

    fn array_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::ArrayLiteral, |p| {
            p.consume(TokenKind::OpenSquare)?;
            let values = p.statement_list()?;
            p.consume(TokenKind::CloseSquare)?;
            Ok(Expression::ArrayLiteral { values })
        })
    }

    fn number_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::NumberLiteral, |p| {
            let token = p.consume(TokenKind::Number)?;
            Ok(Expression::number(token.image))
        })
    }

    fn string_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::StringLiteral, |p| {
            let token = p.consume(TokenKind::String)?;
            Ok(Expression::StringLiteral {
                image: strip_delimiters(&token.image),
            })
        })
    }

    /// `stringStart expression (stringPart expression)* stringEnd`.
    fn interpolated_string_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::InterpolatedStringLiteral, |p| {
            let start = p.consume(TokenKind::StringStart)?;
            let mut parts = vec![
                InterpolationPart::Text {
                    text: strip_delimiters(&start.image),
                },
                InterpolationPart::Embedded {
                    expression: p.expression()?,
                },
            ];
            let segments = p.many(false, |p| {
                let part = p.consume(TokenKind::StringPart)?;
                let expression = p.expression()?;
                Ok((part, expression))
            })?;
            for (part, expression) in segments {
                parts.push(InterpolationPart::Text {
                    text: strip_delimiters(&part.image),
                });
                parts.push(InterpolationPart::Embedded { expression });
            }
            let end = p.consume(TokenKind::StringEnd)?;
            parts.push(InterpolationPart::Text {
                text: strip_delimiters(&end.image),
            });
            Ok(Expression::InterpolatedString { parts })
        })
    }

    fn character_literal(&mut self) -> ParseResult<Expression> {
        self.rule(RuleKind::CharacterLiteral, |p| {
            let token = p.consume(TokenKind::Character)?;
            Ok(Expression::CharacterLiteral {
                image: token.image[1..].to_string(),
            })
        })
    }
}

/// Drop the one-byte delimiter (`"` or `$`) at each end of a string piece.
fn strip_delimiters(image: &str) -> String {
    image
        .get(1..image.len().saturating_sub(1))
        .unwrap_or_default()
        .to_string()
}
