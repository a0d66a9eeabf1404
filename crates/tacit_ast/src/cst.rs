//! Concrete syntax tree: the full grammar trace of one parse.
//!
//! A node of kind *R* exists only if rule *R* succeeded; its children are the
//! tokens and sub-rule nodes consumed by that attempt, in consumption order.

use crate::syntax_kind::RuleKind;
use crate::token::Token;
use serde::Serialize;
use tacit_core::text::TextRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CstNode {
    pub kind: RuleKind,
    pub children: Vec<CstElement>,
}

/// A child of a [`CstNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CstElement {
    Token(Token),
    Node(CstNode),
}

impl CstNode {
    pub fn new(kind: RuleKind, children: Vec<CstElement>) -> Self {
        Self { kind, children }
    }

    /// All tokens under this node, left to right.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for child in &self.children {
            match child {
                CstElement::Token(token) => out.push(token),
                CstElement::Node(node) => node.collect_tokens(out),
            }
        }
    }

    /// Direct child nodes, skipping tokens.
    pub fn child_nodes(&self) -> impl Iterator<Item = &CstNode> {
        self.children.iter().filter_map(|child| match child {
            CstElement::Node(node) => Some(node),
            CstElement::Token(_) => None,
        })
    }

    /// Every node of `kind` in this subtree, in pre-order.
    pub fn descendants_of_kind(&self, kind: RuleKind) -> Vec<&CstNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.kind == kind {
                out.push(node);
            }
            let children: Vec<&CstNode> = node.child_nodes().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Source range covered by the node's tokens; `None` for nodes that
    /// consumed nothing (e.g. `implicit`).
    pub fn range(&self) -> Option<TextRange> {
        let tokens = self.tokens();
        let first = tokens.first()?;
        let last = tokens.last()?;
        Some(TextRange::new(first.start_index, last.end_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::TokenKind;
    use tacit_core::text::LineAndColumn;

    fn tok(kind: TokenKind, image: &str, at: u32) -> CstElement {
        CstElement::Token(Token::new(kind, image, at, LineAndColumn::new(0, at)))
    }

    fn sample() -> CstNode {
        // ( 1 )
        let number = CstNode::new(RuleKind::NumberLiteral, vec![tok(TokenKind::Number, "1", 1)]);
        let inner = CstNode::new(RuleKind::Expression, vec![CstElement::Node(number)]);
        CstNode::new(
            RuleKind::Parenthesized,
            vec![
                tok(TokenKind::OpenParen, "(", 0),
                CstElement::Node(inner),
                tok(TokenKind::CloseParen, ")", 2),
            ],
        )
    }

    #[test]
    fn test_tokens_in_order() {
        let node = sample();
        let images: Vec<&str> = node.tokens().iter().map(|t| t.image.as_str()).collect();
        assert_eq!(images, vec!["(", "1", ")"]);
        assert_eq!(node.range(), Some(TextRange::new(0, 3)));
    }

    #[test]
    fn test_descendants_and_empty_range() {
        let node = sample();
        assert_eq!(node.descendants_of_kind(RuleKind::NumberLiteral).len(), 1);
        assert_eq!(node.child_nodes().count(), 1);
        assert_eq!(CstNode::new(RuleKind::Implicit, vec![]).range(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["kind"], "parenthesized");
        assert_eq!(json["children"][0]["kind"], "openParen");
        assert_eq!(json["children"][1]["kind"], "expression");
        assert_eq!(json["children"][1]["children"][0]["children"][0]["image"], "1");
    }
}
