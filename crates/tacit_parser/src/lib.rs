//! tacit_parser: Builds a CST and an AST from tacit tokens.
//!
//! The parser is a backtracking combinator parser over an already scanned
//! token vector. Every grammar rule is transactional: a failed attempt
//! restores both the token cursor and the CST trace to where it started.

mod grammar;
pub mod parser;
pub mod precedence;

pub use parser::{ParseOutput, Parser};
pub use tacit_options::ParseOptions;

use tacit_ast::Token;
use tacit_diagnostics::{ParseError, SyntaxError};

/// Parse an already scanned token vector.
pub fn parse_tokens(tokens: Vec<Token>, options: &ParseOptions) -> Result<ParseOutput, ParseError> {
    Parser::new(tokens, options.clone()).parse_program()
}

/// Tokenize and parse `source`.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ParseOutput, SyntaxError> {
    let scanned = tacit_scanner::tokenize(source)?;
    Ok(parse_tokens(scanned.into_tokens(), options)?)
}
