//! Parser state and combinator primitives.
//!
//! Grammar rules live in `grammar.rs` and are written in terms of the
//! primitives here: `consume`, `call`, `or`, `many`, `many_separated`,
//! `optional` and `rule`. Each returns a `ParseResult`; an `Err` means the
//! attempt failed and the parser state is back at the attempt's checkpoint.

use log::{debug, trace};
use tacit_ast::{CstElement, CstNode, Program, RuleKind, Token, TokenKind};
use tacit_core::text::LineAndColumn;
use tacit_diagnostics::{ParseError, ParseErrorKind};
use tacit_options::ParseOptions;

pub type ParseResult<T> = Result<T, ParseError>;

/// An ordered-choice alternative.
pub(crate) type Alternative<T> = fn(&mut Parser) -> ParseResult<T>;

/// The result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub program: Program,
    /// The root `program` node of the concrete syntax tree.
    pub cst: CstNode,
}

/// Parser state that can be restored after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    cursor: usize,
    trace_len: usize,
}

/// The tacit parser.
pub struct Parser {
    tokens: Vec<Token>,
    /// Index of the next unconsumed token.
    cursor: usize,
    /// Tokens and finished nodes not yet claimed by an enclosing rule.
    trace: Vec<CstElement>,
    options: ParseOptions,
    /// Current rule nesting.
    depth: u32,
    /// The failure detected furthest into the input.
    furthest: Option<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            tokens,
            cursor: 0,
            trace: Vec::new(),
            options,
            depth: 0,
            furthest: None,
        }
    }

    /// Parse the whole token vector as one program.
    pub fn parse_program(mut self) -> Result<ParseOutput, ParseError> {
        let (program, cst) = self.record(RuleKind::Program, Self::program_body)?;

        if let Some(token) = self.tokens.get(self.cursor) {
            // A failure detected past the leftover token explains it better
            // than the leftover token itself, e.g. a missing closing
            // delimiter. Only leftovers nothing got past may be ignored.
            match &self.furthest {
                Some(furthest) if furthest.offset > token.start_index => return Err(furthest.clone()),
                _ if self.options.allow_trailing_tokens => {
                    debug!("ignoring {} trailing tokens", self.tokens.len() - self.cursor);
                }
                _ => {
                    return Err(error_at_token(
                        ParseErrorKind::TrailingTokens { found: token.image.clone() },
                        token,
                    ))
                }
            }
        }

        debug!(
            "parsed {} statements from {} tokens",
            program.body.len(),
            self.tokens.len()
        );
        Ok(ParseOutput { program, cst })
    }

    // ========================================================================
    // Token access
    // ========================================================================

    #[inline]
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    #[inline]
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            trace_len: self.trace.len(),
        }
    }

    #[inline]
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.trace.truncate(checkpoint.trace_len);
    }

    /// Build an error located at the next token, or at the end of input.
    pub(crate) fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            Some(token) => error_at_token(kind, token),
            None => {
                let (offset, position) = self
                    .tokens
                    .last()
                    .map_or((0, LineAndColumn::default()), |last| (last.end_index, last.end()));
                ParseError::new(kind, offset, position, 0)
            }
        }
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// Consume the next token if it has `kind`, appending it to the trace.
    pub(crate) fn consume(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.peek() {
            Some(token) if token.is(kind) => {
                let token = token.clone();
                self.cursor += 1;
                self.trace.push(CstElement::Token(token.clone()));
                Ok(token)
            }
            found => {
                let found = found.map(|token| token.image.clone());
                Err(self.error_here(ParseErrorKind::Expected {
                    expected: kind.describe().to_string(),
                    found,
                }))
            }
        }
    }

    /// Run `body` as one transaction: on failure the cursor and trace are
    /// restored to where they were before the call.
    pub(crate) fn call<T>(&mut self, body: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let checkpoint = self.checkpoint();
        match body(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.restore(checkpoint);
                self.note_failure(&err);
                Err(err)
            }
        }
    }

    /// Ordered choice: the first alternative that succeeds wins.
    ///
    /// When all fail, the error that got furthest is returned; if none got
    /// past the current token the failure is reported against `rule`.
    pub(crate) fn or<T>(&mut self, rule: &str, alternatives: &[Alternative<T>]) -> ParseResult<T> {
        let mut best: Option<ParseError> = None;
        for alternative in alternatives {
            match self.call(*alternative) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    if best.as_ref().map_or(true, |best| err.offset > best.offset) {
                        best = Some(err);
                    }
                }
            }
        }

        let here = self.peek().map(|token| token.start_index);
        match best {
            Some(err) if here.map_or(false, |here| err.offset > here) => Err(err),
            _ => Err(self.error_here(ParseErrorKind::NoAlternative { rule: rule.to_string() })),
        }
    }

    /// Repetitions of `body`, stopping at the first failure. Zero
    /// repetitions are an error when `at_least_one` is set.
    pub(crate) fn many<T>(
        &mut self,
        at_least_one: bool,
        mut body: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if at_least_one {
            items.push(self.call(&mut body)?);
        }
        while !self.at_end() {
            let before = self.cursor;
            match self.call(&mut body) {
                Ok(item) => {
                    items.push(item);
                    // An iteration that consumed nothing would repeat forever.
                    if self.cursor == before {
                        break;
                    }
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => break,
            }
        }
        Ok(items)
    }

    /// `body (separator body)*`, or possibly nothing unless `at_least_one`.
    ///
    /// A separator is only consumed together with the item following it.
    pub(crate) fn many_separated<T>(
        &mut self,
        separator: TokenKind,
        at_least_one: bool,
        mut body: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        match self.call(&mut body) {
            Ok(item) => items.push(item),
            Err(err) if err.is_fatal() || at_least_one => return Err(err),
            Err(_) => return Ok(items),
        }
        loop {
            let next = self.call(|p| {
                p.consume(separator)?;
                body(p)
            });
            match next {
                Ok(item) => items.push(item),
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => break,
            }
        }
        Ok(items)
    }

    /// Try `body`; its failure is not an error.
    pub(crate) fn optional<T>(&mut self, body: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<Option<T>> {
        match self.call(body) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_fatal() => Err(err),
            Err(_) => Ok(None),
        }
    }

    /// Run `body` as grammar rule `kind`. On success, everything it appended
    /// to the trace becomes the children of one new `kind` node.
    pub(crate) fn rule<T>(&mut self, kind: RuleKind, body: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let (value, node) = self.record(kind, body)?;
        self.trace.push(CstElement::Node(node));
        Ok(value)
    }

    /// Like [`Parser::rule`], but hands the node back instead of tracing it.
    fn record<T>(
        &mut self,
        kind: RuleKind,
        body: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<(T, CstNode)> {
        trace!("{} at token {}", kind, self.cursor);
        self.enter_rule()?;
        let mark = self.trace.len();
        let result = self.call(body);
        self.depth -= 1;
        let value = result?;
        let children = self.trace.split_off(mark);
        Ok((value, CstNode::new(kind, children)))
    }

    fn enter_rule(&mut self) -> ParseResult<()> {
        let limit = self.options.max_nesting_depth;
        if self.depth >= limit {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep { limit }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Remember `err` if it is at least as far into the input as any earlier
    /// failure. Among failures at the same offset the latest one wins, since
    /// it comes from the outermost rule still making progress.
    fn note_failure(&mut self, err: &ParseError) {
        if self.furthest.as_ref().map_or(true, |furthest| err.offset >= furthest.offset) {
            self.furthest = Some(err.clone());
        }
    }
}

pub(crate) fn error_at_token(kind: ParseErrorKind, token: &Token) -> ParseError {
    ParseError::new(
        kind,
        token.start_index,
        token.start(),
        token.end_index - token.start_index,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacit_scanner::tokenize;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize(source).unwrap().into_tokens(), ParseOptions::default())
    }

    #[test]
    fn test_consume_and_restore() {
        let mut p = parser("( 1");
        let checkpoint = p.checkpoint();
        assert!(p.consume(TokenKind::OpenParen).is_ok());
        assert_eq!(p.trace.len(), 1);
        p.restore(checkpoint);
        assert_eq!(p.cursor, 0);
        assert!(p.trace.is_empty());

        let err = p.consume(TokenKind::CloseParen).unwrap_err();
        assert_eq!(err.message, "')' expected, found '('.");
    }

    #[test]
    fn test_call_is_transactional() {
        let mut p = parser("( 1 ]");
        let result = p.call(|p| {
            p.consume(TokenKind::OpenParen)?;
            p.consume(TokenKind::Number)?;
            p.consume(TokenKind::CloseParen)
        });
        let err = result.unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(p.cursor, 0);
        assert!(p.trace.is_empty());
        assert_eq!(p.furthest.as_ref().map(|e| e.offset), Some(4));
    }

    #[test]
    fn test_expected_at_end_of_input() {
        let mut p = parser("1");
        p.consume(TokenKind::Number).unwrap();
        let err = p.consume(TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.message, "';' expected at end of input.");
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_many_separated() {
        let mut p = parser("1;2;3;");
        let items = p
            .many_separated(TokenKind::Semicolon, true, |p| p.consume(TokenKind::Number))
            .unwrap();
        assert_eq!(items.len(), 3);
        // The dangling separator stays unconsumed.
        assert_eq!(p.peek().map(|t| t.kind), Some(TokenKind::Semicolon));

        let mut p = parser(";");
        let items = p
            .many_separated(TokenKind::Semicolon, false, |p| p.consume(TokenKind::Number))
            .unwrap();
        assert!(items.is_empty());
        assert!(p
            .many_separated(TokenKind::Semicolon, true, |p| p.consume(TokenKind::Number))
            .is_err());
    }

    #[test]
    fn test_many_and_optional() {
        let mut p = parser("1 2 3 ;");
        let numbers = p.many(false, |p| p.consume(TokenKind::Number)).unwrap();
        assert_eq!(numbers.len(), 3);
        assert_eq!(p.optional(|p| p.consume(TokenKind::Colon)).unwrap(), None);
        assert!(p.optional(|p| p.consume(TokenKind::Semicolon)).unwrap().is_some());
        assert!(p.at_end());
        assert!(p.many(false, |p| p.consume(TokenKind::Number)).unwrap().is_empty());
    }

    #[test]
    fn test_many_at_least_one() {
        let mut p = parser("1 2 ;");
        let numbers = p.many(true, |p| p.consume(TokenKind::Number)).unwrap();
        assert_eq!(numbers.len(), 2);
        let err = p.many(true, |p| p.consume(TokenKind::Number)).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "number".into(),
                found: Some(";".into())
            }
        );
        assert_eq!(p.cursor, 2);

        let mut p = parser("");
        assert!(p.many(true, |p| p.consume(TokenKind::Number)).is_err());
        assert!(p.many(false, |p| p.consume(TokenKind::Number)).unwrap().is_empty());
    }

    #[test]
    fn test_many_stops_without_progress() {
        let mut p = parser("1");
        let empties = p.many(false, |_| Ok(())).unwrap();
        assert_eq!(empties.len(), 1);
    }

    #[test]
    fn test_rule_builds_node() {
        let mut p = parser("( 1 )");
        p.rule(RuleKind::Parenthesized, |p| {
            p.consume(TokenKind::OpenParen)?;
            p.rule(RuleKind::NumberLiteral, |p| p.consume(TokenKind::Number))?;
            p.consume(TokenKind::CloseParen)
        })
        .unwrap();
        assert_eq!(p.trace.len(), 1);
        let CstElement::Node(node) = &p.trace[0] else {
            panic!("expected a node");
        };
        assert_eq!(node.kind, RuleKind::Parenthesized);
        assert_eq!(node.children.len(), 3);
        assert_eq!(p.depth, 0);
    }

    #[test]
    fn test_or_reports_no_alternative() {
        let mut p = parser(";");
        let alternatives: [Alternative<Token>; 2] =
            [|p| p.consume(TokenKind::Number), |p| p.consume(TokenKind::String)];
        let err = p.or("literal", &alternatives).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NoAlternative { rule: "literal".into() });
    }

    #[test]
    fn test_nesting_limit_is_fatal() {
        let mut p = Parser::new(
            tokenize("1").unwrap().into_tokens(),
            ParseOptions::default().with_max_nesting_depth(2),
        );
        let err = p
            .rule(RuleKind::Expression, |p| {
                p.rule(RuleKind::Term, |p| p.rule(RuleKind::NumberLiteral, |p| p.consume(TokenKind::Number)))
            })
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(p.depth, 0);
    }
}
