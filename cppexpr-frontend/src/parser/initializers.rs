//! Argument lists and initializers
//!
//! Shared by calls, placement lists, `new` initializers and functional
//! casts.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};

impl Parser {
    /// `( clause, clause, ... )`, possibly empty
    pub fn parse_argument_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenType::LeftParen, "argument list")?;
        if self.match_token(&TokenType::RightParen) {
            return Ok(Vec::new());
        }

        let arguments = self.with_mode(ParseMode::Arguments, |p| {
            let mut arguments = Vec::new();
            loop {
                arguments.push(p.require("argument", |p| p.parse_initializer_clause())?);
                if !p.match_token(&TokenType::Comma) {
                    return Ok(arguments);
                }
            }
        })?;

        self.require_token(TokenType::RightParen, "argument list")?;
        Ok(arguments)
    }

    /// `{ clause, clause, ... }` with an optional trailing comma
    pub fn parse_braced_init_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenType::LeftBrace, "initializer list")?;

        let items = self.descend(|p| {
            p.with_mode(ParseMode::Expression, |p| {
                let mut items = Vec::new();
                while !p.check(&TokenType::RightBrace) {
                    items.push(p.require("initializer", |p| p.parse_initializer_clause())?);
                    if !p.match_token(&TokenType::Comma) {
                        break;
                    }
                }
                Ok(items)
            })
        })?;

        self.require_token(TokenType::RightBrace, "initializer list")?;
        Ok(items)
    }

    /// An assignment expression or a nested braced list
    pub fn parse_initializer_clause(&mut self) -> Result<Expression, ParseError> {
        if !self.check(&TokenType::LeftBrace) {
            return self.parse_assignment_expression();
        }
        let start = self.peek().span.clone();
        let items = self.parse_braced_init_list()?;
        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::InitializerList(items), span))
    }

    /// Parenthesised or braced initializer, soft when neither opens here
    pub fn parse_initializer(&mut self) -> Result<Initializer, ParseError> {
        match self.peek_type() {
            TokenType::LeftBrace => Ok(Initializer::Braced(self.parse_braced_init_list()?)),
            _ => Ok(Initializer::Parens(self.parse_argument_list()?)),
        }
    }
}
