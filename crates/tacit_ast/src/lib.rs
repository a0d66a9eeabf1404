//! tacit_ast: Token, concrete syntax tree and abstract syntax tree definitions.
//!
//! The token kind set is closed and its camelCase spelling is part of the
//! public contract (it is what JSON dumps contain). Every successful grammar
//! rule produces one [`CstNode`] and one AST value describing the same span.

pub mod cst;
pub mod node;
pub mod syntax_kind;
pub mod token;

// Re-export key types
pub use cst::{CstElement, CstNode};
pub use node::*;
pub use syntax_kind::{RuleKind, TokenKind};
pub use token::Token;
