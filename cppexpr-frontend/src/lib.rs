//! C++ expression parser - Frontend
//!
//! This crate provides the pieces that turn C++ expression text into a tree:
//! - Lexer: tokenizes the source, keeping `>` tokens unmerged
//! - Parser: recursive descent with backtracking over a parsing context
//! - AST: expression, name and type-id nodes with printers and a visitor

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    to_json, BinaryOp, Expression, ExpressionKind, IdExpression, Initializer, NewExpression, NewTarget,
    NodeCounter, NodeIdGenerator, TypeId, TypeOrExpression, UnaryOp, UnqualifiedId, Visitor,
};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{NameContext, ParseError, ParseMode, Parser, ParserConfig, ParsingContext};

use cppexpr_common::{CompilerError, SourceLocation};

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse one C++ expression with the default configuration
    pub fn parse_expression(source: &str, filename: &str) -> Result<Expression, CompilerError> {
        Self::parse_expression_with(source, filename, ParserConfig::default(), ParsingContext::new())
    }

    /// Parse one C++ expression starting from `context`
    pub fn parse_expression_with(
        source: &str,
        filename: &str,
        config: ParserConfig,
        context: ParsingContext,
    ) -> Result<Expression, CompilerError> {
        Self::parse_expression_at(source, SourceLocation::new(filename, 1, 1, 0), config, context)
    }

    /// Parse one C++ expression cut out of a larger file at `start`, so
    /// every reported location is a location in that file
    pub fn parse_expression_at(
        source: &str,
        start: SourceLocation,
        config: ParserConfig,
        context: ParsingContext,
    ) -> Result<Expression, CompilerError> {
        let tokens = Lexer::starting_at(source, start).tokenize()?;
        let mut parser = Parser::new(tokens).with_config(config).with_context(context);
        parser.parse()
    }

    /// Tokenize source code (for debugging/IDE features)
    pub fn tokenize_source(source: &str, filename: &str) -> Result<Vec<Token>, CompilerError> {
        let mut lexer = Lexer::with_filename(source, filename);
        lexer.tokenize()
    }
}
