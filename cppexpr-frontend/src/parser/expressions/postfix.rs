//! Postfix expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{NameContext, ParseError, ParseMode, Parser};

impl Parser {
    /// Parse postfix expression
    pub fn parse_postfix_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let start = expr.span.clone();
            let kind = match self.peek_type() {
                TokenType::LeftBracket => {
                    // Array indexing
                    self.advance();
                    let index = self.with_mode(ParseMode::Expression, |p| {
                        p.require("subscript expression", |p| p.parse_expression())
                    })?;
                    self.require_token(TokenType::RightBracket, "subscript")?;
                    ExpressionKind::Index {
                        base: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                TokenType::LeftParen => {
                    // Function call
                    let arguments = self.parse_argument_list()?;
                    ExpressionKind::Call {
                        function: Box::new(expr),
                        arguments,
                    }
                }
                TokenType::Dot | TokenType::Arrow => {
                    let is_pointer = self.check(&TokenType::Arrow);
                    self.advance();
                    // `x.template f<T>()` names the same member as `x.f<T>()`
                    self.match_token(&TokenType::Template);
                    let member = self.require("member name", |p| p.parse_id_expression(NameContext::Expression))?;
                    ExpressionKind::Member {
                        object: Box::new(expr),
                        member,
                        is_pointer,
                    }
                }
                TokenType::PlusPlus | TokenType::MinusMinus => {
                    let op = if self.check(&TokenType::PlusPlus) {
                        UnaryOp::PostIncrement
                    } else {
                        UnaryOp::PostDecrement
                    };
                    self.advance();
                    ExpressionKind::Unary {
                        op,
                        operand: Box::new(expr),
                    }
                }
                _ => break,
            };

            let span = self.span_from(&start);
            expr = self.node(kind, span);
        }

        Ok(expr)
    }
}
