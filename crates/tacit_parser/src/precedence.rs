//! Operator precedence and the reduction of flat operator/operand runs.
//!
//! An expression is parsed as a flat run of operands and operators, then
//! folded into a tree here with two stacks: all binary operators are
//! left-associative, postfix operators bind tighter than everything below
//! the multiplicative level, and a ternary takes everything before it as its
//! condition.

use tacit_ast::{Expression, Token};

/// Binary operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// `|` `&`
    Logical = 0,
    /// `b&` `b|` `b^` `b>` `b<`
    Bitwise = 1,
    /// `eq` `nq`
    Equality = 2,
    /// `<` `>`
    Relational = 3,
    /// `+` `-`
    Additive = 4,
    /// `*` `%` `/` `\` `` ` `` `^` `.` `@` `$`
    Multiplicative = 5,
    /// `,`
    Pairing = 6,
}

/// Get the precedence of a binary operator by its exact spelling.
pub fn get_binary_operator_precedence(op: &str) -> Option<OperatorPrecedence> {
    let precedence = match op {
        "|" | "&" => OperatorPrecedence::Logical,
        "b&" | "b|" | "b^" | "b>" | "b<" => OperatorPrecedence::Bitwise,
        "eq" | "nq" => OperatorPrecedence::Equality,
        "<" | ">" => OperatorPrecedence::Relational,
        "+" | "-" => OperatorPrecedence::Additive,
        "*" | "%" | "/" | "\\" | "`" | "^" | "." | "@" | "$" => OperatorPrecedence::Multiplicative,
        "," => OperatorPrecedence::Pairing,
        _ => return None,
    };
    Some(precedence)
}

/// One element of a flat expression run.
#[derive(Debug, Clone)]
pub(crate) enum ExprItem {
    Operand(Expression),
    Binary(Token),
    Postfix(Token),
    Ternary {
        when_true: Expression,
        when_false: Expression,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolveError {
    UnknownOperator(Token),
    /// Reduction did not end with exactly one operand.
    Malformed { operands: usize },
}

#[derive(Default)]
struct Resolver {
    operands: Vec<Expression>,
    operators: Vec<(String, OperatorPrecedence)>,
}

impl Resolver {
    fn pop_operand(&mut self) -> Result<Expression, ResolveError> {
        self.operands.pop().ok_or(ResolveError::Malformed { operands: 0 })
    }

    /// Reduce pending binary operators while `keep_reducing` holds for the
    /// one on top of the stack.
    fn reduce_while(&mut self, keep_reducing: impl Fn(OperatorPrecedence) -> bool) -> Result<(), ResolveError> {
        while let Some(&(_, top)) = self.operators.last() {
            if !keep_reducing(top) {
                break;
            }
            let Some((op, _)) = self.operators.pop() else { break };
            if self.operands.len() < 2 {
                return Err(ResolveError::Malformed {
                    operands: self.operands.len(),
                });
            }
            let right = self.pop_operand()?;
            let left = self.pop_operand()?;
            self.operands.push(Expression::binary(op, left, right));
        }
        Ok(())
    }
}

/// Fold a flat run into a single expression.
pub(crate) fn resolve(items: Vec<ExprItem>) -> Result<Expression, ResolveError> {
    let mut resolver = Resolver::default();
    for item in items {
        match item {
            ExprItem::Operand(operand) => resolver.operands.push(operand),
            ExprItem::Binary(token) => {
                let Some(precedence) = get_binary_operator_precedence(&token.image) else {
                    return Err(ResolveError::UnknownOperator(token));
                };
                resolver.reduce_while(|top| top >= precedence)?;
                resolver.operators.push((token.image, precedence));
            }
            ExprItem::Postfix(token) => {
                resolver.reduce_while(|top| top >= OperatorPrecedence::Multiplicative)?;
                let argument = resolver.pop_operand()?;
                resolver.operands.push(Expression::postfix(token.image, argument));
            }
            ExprItem::Ternary { when_true, when_false } => {
                resolver.reduce_while(|_| true)?;
                let condition = resolver.pop_operand()?;
                resolver.operands.push(Expression::ternary(condition, when_true, when_false));
            }
        }
    }
    resolver.reduce_while(|_| true)?;

    match resolver.operands.len() {
        1 => resolver.pop_operand(),
        operands => Err(ResolveError::Malformed { operands }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacit_ast::TokenKind;
    use tacit_core::text::LineAndColumn;

    fn operand(name: &str) -> ExprItem {
        ExprItem::Operand(Expression::variable(name))
    }

    fn binary(op: &str) -> ExprItem {
        ExprItem::Binary(Token::new(TokenKind::BinaryOperatorName, op, 0, LineAndColumn::default()))
    }

    fn postfix(op: &str) -> ExprItem {
        ExprItem::Postfix(Token::new(TokenKind::PostfixOperatorName, op, 0, LineAndColumn::default()))
    }

    fn v(name: &str) -> Expression {
        Expression::variable(name)
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(get_binary_operator_precedence("|"), Some(OperatorPrecedence::Logical));
        assert_eq!(get_binary_operator_precedence("b^"), Some(OperatorPrecedence::Bitwise));
        assert_eq!(get_binary_operator_precedence("nq"), Some(OperatorPrecedence::Equality));
        assert_eq!(get_binary_operator_precedence(">"), Some(OperatorPrecedence::Relational));
        assert_eq!(get_binary_operator_precedence("-"), Some(OperatorPrecedence::Additive));
        assert_eq!(get_binary_operator_precedence("\\"), Some(OperatorPrecedence::Multiplicative));
        assert_eq!(get_binary_operator_precedence("$"), Some(OperatorPrecedence::Multiplicative));
        assert_eq!(get_binary_operator_precedence(","), Some(OperatorPrecedence::Pairing));
        // Exact spelling only: `b` alone is not an operator.
        assert_eq!(get_binary_operator_precedence("b"), None);
        assert_eq!(get_binary_operator_precedence("**"), None);
    }

    #[test]
    fn test_higher_precedence_binds_tighter() {
        let expr = resolve(vec![operand("A"), binary("+"), operand("B"), binary("*"), operand("C")]).unwrap();
        assert_eq!(expr, Expression::binary("+", v("A"), Expression::binary("*", v("B"), v("C"))));

        let expr = resolve(vec![operand("A"), binary("*"), operand("B"), binary("+"), operand("C")]).unwrap();
        assert_eq!(expr, Expression::binary("+", Expression::binary("*", v("A"), v("B")), v("C")));
    }

    #[test]
    fn test_left_associative() {
        let expr = resolve(vec![operand("A"), binary("-"), operand("B"), binary("-"), operand("C")]).unwrap();
        assert_eq!(expr, Expression::binary("-", Expression::binary("-", v("A"), v("B")), v("C")));
    }

    #[test]
    fn test_pairing_binds_tightest() {
        let expr = resolve(vec![operand("A"), binary("*"), operand("B"), binary(","), operand("C")]).unwrap();
        assert_eq!(expr, Expression::binary("*", v("A"), Expression::binary(",", v("B"), v("C"))));
    }

    #[test]
    fn test_postfix_after_multiplicative() {
        // A * B sz  =>  sz(A * B)
        let expr = resolve(vec![operand("A"), binary("*"), operand("B"), postfix("sz")]).unwrap();
        assert_eq!(expr, Expression::postfix("sz", Expression::binary("*", v("A"), v("B"))));

        // A + B sz  =>  A + sz(B)
        let expr = resolve(vec![operand("A"), binary("+"), operand("B"), postfix("sz")]).unwrap();
        assert_eq!(expr, Expression::binary("+", v("A"), Expression::postfix("sz", v("B"))));
    }

    #[test]
    fn test_ternary_takes_whole_prefix() {
        let expr = resolve(vec![
            operand("A"),
            binary("<"),
            operand("B"),
            ExprItem::Ternary {
                when_true: v("X"),
                when_false: v("Y"),
            },
        ])
        .unwrap();
        assert_eq!(expr, Expression::ternary(Expression::binary("<", v("A"), v("B")), v("X"), v("Y")));
    }

    #[test]
    fn test_errors() {
        let err = resolve(vec![operand("A"), binary("??"), operand("B")]).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownOperator(token) if token.image == "??"));

        assert_eq!(
            resolve(vec![operand("A"), operand("B")]).unwrap_err(),
            ResolveError::Malformed { operands: 2 }
        );
        assert_eq!(
            resolve(vec![binary("+"), operand("B")]).unwrap_err(),
            ResolveError::Malformed { operands: 1 }
        );
        assert_eq!(resolve(vec![]).unwrap_err(), ResolveError::Malformed { operands: 0 });
    }
}
