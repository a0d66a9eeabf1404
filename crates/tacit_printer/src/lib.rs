//! tacit_printer: AST to canonical source text.
//!
//! Output is whitespace-normalized: tokens are separated by single spaces,
//! except right after an opening delimiter, around the `$` delimiters of an
//! interpolation and between `~` and its operator. Parentheses appear only
//! where the AST has a `parenthesized` node. Comments are not preserved.

use tacit_ast::node::*;

/// Print a whole program.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.print_program(program);
    printer.finish()
}

/// Print a single expression.
pub fn print_expression(expression: &Expression) -> String {
    let mut printer = Printer::new();
    printer.print_expression(expression);
    printer.finish()
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    /// True right after an opening delimiter, where no space is written.
    group_start: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(256),
            group_start: true,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn print_program(&mut self, program: &Program) {
        self.print_statements(&program.body);
    }

    fn print_statements(&mut self, statements: &[Expression]) {
        for (i, statement) in statements.iter().enumerate() {
            if i > 0 {
                self.glue(";");
            }
            self.print_expression(statement);
        }
    }

    pub fn print_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::BinaryOp { op, left, right } => {
                self.print_expression(left);
                self.word(op);
                self.print_expression(right);
            }
            Expression::PostfixOp { op, argument } => {
                self.print_expression(argument);
                self.word(op);
            }
            Expression::Ternary {
                condition,
                when_true,
                when_false,
            } => {
                self.print_expression(condition);
                self.word("?");
                self.print_expression(when_true);
                self.word(":");
                self.print_expression(when_false);
            }
            Expression::Assignment { name, modifier, value } => {
                self.word(name);
                match modifier {
                    Some(modifier) => {
                        self.word(modifier);
                        self.glue("=");
                    }
                    None => self.word("="),
                }
                self.print_expression(value);
            }
            Expression::VariableReference { name } => self.word(name),
            Expression::OperatorReference { op } => {
                self.word("~");
                self.glue(op);
            }
            Expression::NumberLiteral { image } => self.word(image),
            Expression::StringLiteral { image } => self.word(&format!("\"{}\"", image)),
            Expression::InterpolatedString { parts } => self.print_interpolated_string(parts),
            Expression::CharacterLiteral { image } => self.word(&format!("'{}", image)),
            Expression::FunctionLiteral { body } => {
                self.open("{");
                self.print_statements(body);
                self.glue("}");
            }
            Expression::ArrayLiteral { values } => {
                self.open("[");
                self.print_statements(values);
                self.glue("]");
            }
            Expression::Parenthesized { inner } => {
                self.open("(");
                self.print_expression(inner);
                self.glue(")");
            }
            Expression::Implicit => {}
        }
    }

    fn print_interpolated_string(&mut self, parts: &[InterpolationPart]) {
        let last = parts.len().saturating_sub(1);
        for (i, part) in parts.iter().enumerate() {
            match part {
                InterpolationPart::Text { text } => {
                    let open = if i == 0 { "\"" } else { "$" };
                    let close = if i == last { "\"" } else { "$" };
                    let segment = format!("{}{}{}", open, text, close);
                    if i == 0 {
                        self.word(&segment);
                    } else {
                        self.glue(&segment);
                    }
                    self.group_start = i != last;
                }
                InterpolationPart::Embedded { expression } => self.print_expression(expression),
            }
        }
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Write a token, space-separated from the previous one.
    fn word(&mut self, text: &str) {
        if !self.output.is_empty() && !self.group_start {
            self.output.push(' ');
        }
        self.glue(text);
    }

    /// Write a token directly after the previous one.
    fn glue(&mut self, text: &str) {
        self.output.push_str(text);
        self.group_start = false;
    }

    fn open(&mut self, delimiter: &str) {
        self.word(delimiter);
        self.group_start = true;
    }
}
