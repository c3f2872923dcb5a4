//! C++ expression recursive descent parser
//!
//! Parses C++ tokens into an expression tree, one method per precedence
//! tier. Alternatives that share a prefix are tried speculatively with
//! `attempt`, which rewinds the token cursor on a soft mismatch; once a
//! construct has committed, `require` turns any mismatch into a hard error.

pub mod config;
pub mod context;
pub mod errors;
pub mod expressions;
pub mod initializers;
pub mod names;
pub mod types;

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use cppexpr_common::{CompilerError, SourceSpan};
use log::{debug, trace};
use std::collections::HashMap;

pub use config::ParserConfig;
pub use context::{ParseMode, ParsingContext};
pub use errors::ParseError;
pub use names::NameContext;

type MemoEntry = Result<(Expression, usize), ParseError>;

/// Stack left before `descend` switches to a fresh heap segment. Covers the
/// deepest chain of frames between two guarded rules in an unoptimised build.
const STACK_RED_ZONE: usize = 256 * 1024;
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// C++ expression parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    pub(crate) node_id_gen: NodeIdGenerator,
    pub(crate) context: ParsingContext,
    pub(crate) config: ParserConfig,
    depth: usize,
    memo: HashMap<usize, MemoEntry>,
    memo_hits: usize,
    furthest: Option<ParseError>,
}

impl Parser {
    /// Create a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        // Filter out comments and newlines for parsing
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.token_type.is_trivia())
            .collect();

        if !matches!(tokens.last().map(|t| &t.token_type), Some(TokenType::EndOfFile)) {
            let end = tokens
                .last()
                .map(|t| t.span.end.clone())
                .unwrap_or_else(cppexpr_common::SourceLocation::dummy);
            tokens.push(Token::eof(end));
        }

        Self {
            tokens,
            position: 0,
            node_id_gen: NodeIdGenerator::new(),
            context: ParsingContext::new(),
            config: ParserConfig::default(),
            depth: 0,
            memo: HashMap::new(),
            memo_hits: 0,
            furthest: None,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config.validated();
        self
    }

    /// Start from a caller-supplied context, e.g. inside template arguments
    pub fn with_context(mut self, context: ParsingContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> &ParsingContext {
        &self.context
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Peek `n` tokens ahead; runs off the end onto the final EOF token
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub(crate) fn peek_type(&self) -> &TokenType {
        &self.peek().token_type
    }

    /// Get current token and advance (never past EOF)
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(self.peek_type()) == std::mem::discriminant(token_type)
    }

    pub(crate) fn check_nth(&self, n: usize, token_type: &TokenType) -> bool {
        std::mem::discriminant(&self.peek_nth(n).token_type) == std::mem::discriminant(token_type)
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a specific token type or fail softly
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{}` in {}", token_type, context)))
        }
    }

    /// Consume a specific token type or fail hard
    pub(crate) fn require_token(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(ParseError::Expected {
                expected: format!("`{}` in {}", token_type, context),
                found: self.peek().clone(),
            })
        }
    }

    /// Soft mismatch at the current token
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().clone(),
        }
    }

    /// `>` immediately followed by another `>`, spelled `>>`
    pub(crate) fn at_right_shift(&self) -> bool {
        self.check(&TokenType::Greater)
            && self.check_nth(1, &TokenType::Greater)
            && self.peek().touches(self.peek_nth(1))
    }

    /// `>` immediately followed by `>=`, spelled `>>=`
    pub(crate) fn at_right_shift_assign(&self) -> bool {
        self.check(&TokenType::Greater)
            && self.check_nth(1, &TokenType::GreaterEqual)
            && self.peek().touches(self.peek_nth(1))
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.position
    }

    pub(crate) fn rewind(&mut self, checkpoint: usize) {
        self.position = checkpoint;
    }

    /// Span from the start of `start` to the end of the last consumed token
    pub(crate) fn span_from(&self, start: &SourceSpan) -> SourceSpan {
        let end = if self.position == 0 {
            start.end.clone()
        } else {
            self.tokens[self.position - 1].span.end.clone()
        };
        SourceSpan::new(start.start.clone(), end)
    }

    pub(crate) fn node(&mut self, kind: ExpressionKind, span: SourceSpan) -> Expression {
        Expression {
            node_id: self.node_id_gen.next(),
            kind,
            span,
        }
    }

    /// Try an alternative; a soft failure rewinds and yields `None`
    pub(crate) fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let start = self.position;
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_soft() => {
                trace!("rewinding to token {} after: {}", start, err);
                self.note_failure(err);
                self.position = start;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Run `f` and report whether it would match, without consuming input
    pub(crate) fn lookahead<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<bool, ParseError> {
        let start = self.position;
        let matched = self.attempt(f)?.is_some();
        self.position = start;
        Ok(matched)
    }

    /// A committed construct: any soft failure inside becomes hard
    pub(crate) fn require<T>(
        &mut self,
        expected: &str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.harden(expected))
    }

    /// Run `f` with `mode` pushed; the mode is popped on every exit
    pub(crate) fn with_mode<T>(
        &mut self,
        mode: ParseMode,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.context.push(mode);
        let result = f(self);
        self.context.pop();
        result
    }

    /// Guard against unbounded recursion on deeply nested input.
    ///
    /// Every recursive rule passes through here, so the stack is grown on
    /// the heap before it runs low and `max_depth` alone bounds nesting.
    pub(crate) fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                span: self.peek().span.clone(),
            });
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            self.depth += 1;
            let result = f(self);
            self.depth -= 1;
            result
        })
    }

    pub(crate) fn memo_lookup(&mut self, position: usize) -> Option<Result<Expression, ParseError>> {
        if !self.config.memoize {
            return None;
        }
        let entry = self.memo.get(&position)?.clone();
        self.memo_hits += 1;
        Some(entry.map(|(expr, end)| {
            self.position = end;
            expr
        }))
    }

    pub(crate) fn memo_store(&mut self, position: usize, result: &Result<Expression, ParseError>) {
        if !self.config.memoize {
            return;
        }
        match result {
            Ok(expr) => {
                self.memo.insert(position, Ok((expr.clone(), self.position)));
            }
            Err(err) if err.is_soft() => {
                self.memo.insert(position, Err(err.clone()));
            }
            Err(_) => {}
        }
    }

    /// Remember the soft failure that got furthest into the input
    fn note_failure(&mut self, err: ParseError) {
        let further = self
            .furthest
            .as_ref()
            .map_or(true, |best| err.offset() > best.offset());
        if further {
            self.furthest = Some(err);
        }
    }

    /// Span of all non-trivia input, up to the end of the last real token
    fn input_span(&self) -> SourceSpan {
        let first = &self.tokens[0].span;
        let last = &self.tokens[self.tokens.len() - 1].span;
        SourceSpan::between(first, last)
    }

    /// Parse the whole input as one expression
    pub fn parse(&mut self) -> Result<Expression, CompilerError> {
        let input = self.input_span();
        debug!("parsing expression of {} tokens", self.tokens.len() - 1);

        let result = self.parse_complete();
        debug!(
            "parse {} ({} nodes, {} memo entries, {} memo hits)",
            if result.is_ok() { "succeeded" } else { "failed" },
            self.node_id_gen.issued(),
            self.memo.len(),
            self.memo_hits
        );
        result.map_err(|err| err.into_compiler_error(input))
    }

    fn parse_complete(&mut self) -> Result<Expression, ParseError> {
        if self.check(&TokenType::EndOfFile) {
            return Err(ParseError::EmptyInput {
                span: self.peek().span.clone(),
            });
        }

        let depth = self.context.depth();
        let result = self.parse_expression();
        debug_assert_eq!(depth, self.context.depth(), "parsing context left unbalanced");

        let expr = match result {
            Ok(expr) => expr,
            Err(err) if err.is_soft() => return Err(self.furthest_failure(err)),
            Err(err) => return Err(err),
        };

        if !self.check(&TokenType::EndOfFile) {
            let found = self.peek().clone();
            let end = self.tokens[self.tokens.len() - 1].span.clone();
            return Err(ParseError::TrailingInput {
                span: SourceSpan::between(&found.span, &end),
                found,
            });
        }

        Ok(expr)
    }

    /// Prefer the soft failure that got furthest when nothing matched
    fn furthest_failure(&mut self, err: ParseError) -> ParseError {
        match self.furthest.take() {
            Some(best) if best.offset() > err.offset() => best,
            _ => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parser_for(input: &str) -> Parser {
        let mut lexer = Lexer::new(input);
        Parser::new(lexer.tokenize().unwrap())
    }

    fn parse_expression_from_str(input: &str) -> Result<Expression, CompilerError> {
        parser_for(input).parse()
    }

    #[test]
    fn test_parse_integer_literal() {
        let expr = parse_expression_from_str("42").unwrap();
        match expr.kind {
            ExpressionKind::Literal(Literal { kind: LiteralKind::Integer(value), .. }) => assert_eq!(value, 42),
            _ => panic!("Expected integer literal"),
        }
    }

    #[test]
    fn test_parse_identifier() {
        let expr = parse_expression_from_str("variable").unwrap();
        assert_eq!(expr.kind, ExpressionKind::Id(IdExpression::identifier("variable")));
    }

    #[test]
    fn test_operator_precedence() {
        let expr = parse_expression_from_str("2 + 3 * 4").unwrap();
        assert_eq!(expr.to_sexpr(), "(+ 2 (* 3 4))");
    }

    #[test]
    fn test_comments_are_ignored() {
        let expr = parse_expression_from_str("a /* first */ +\n b // done").unwrap();
        assert_eq!(expr.to_sexpr(), "(+ a b)");
    }

    #[test]
    fn test_attempt_rewinds_on_soft_failure() {
        let mut parser = parser_for("a b");
        let result = parser
            .attempt(|p| {
                p.advance();
                Err::<(), _>(p.unexpected("nothing"))
            })
            .unwrap();
        assert!(result.is_none());
        assert_eq!(parser.checkpoint(), 0);
    }

    #[test]
    fn test_attempt_propagates_hard_failure() {
        let mut parser = parser_for("a b");
        let result = parser.attempt(|p| {
            p.advance();
            p.require_token(TokenType::Comma, "test")
        });
        assert!(matches!(result, Err(ParseError::Expected { .. })));
    }

    #[test]
    fn test_with_mode_pops_on_failure() {
        let mut parser = parser_for("x");
        let result = parser.with_mode(ParseMode::Lvalue, |p| {
            assert!(p.context().parsing_lvalue());
            Err::<(), _>(p.unexpected("anything"))
        });
        assert!(result.is_err());
        assert_eq!(parser.context().depth(), 0);
    }

    #[test]
    fn test_right_shift_needs_adjacent_angles() {
        let parser = parser_for(">> > >");
        assert!(parser.at_right_shift());

        let mut parser = parser_for("> >");
        assert!(!parser.at_right_shift());
        parser.advance();
        assert!(!parser.at_right_shift());

        let parser = parser_for(">>=");
        assert!(parser.at_right_shift_assign());
        assert!(!parser.at_right_shift());
    }

    #[test]
    fn test_empty_input() {
        let err = parse_expression_from_str("  // nothing here\n").unwrap_err();
        match err {
            CompilerError::ParseError { message, .. } => {
                assert_eq!(message, "expected an expression, found end of input");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
