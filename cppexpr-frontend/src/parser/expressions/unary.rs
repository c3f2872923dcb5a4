//! Unary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};
use cppexpr_common::SourceSpan;

impl Parser {
    /// Parse unary expression
    pub fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();

        let op = match self.peek_type() {
            TokenType::PlusPlus | TokenType::MinusMinus => {
                let op = if self.check(&TokenType::PlusPlus) {
                    UnaryOp::PreIncrement
                } else {
                    UnaryOp::PreDecrement
                };
                self.advance();
                let operand = self.descend(|p| {
                    p.require(&format!("operand of `{op}`"), |p| p.parse_unary_expression())
                })?;
                let span = self.span_from(&start);
                return Ok(self.unary(op, operand, span));
            }
            TokenType::Star => UnaryOp::Dereference,
            TokenType::Ampersand => UnaryOp::AddressOf,
            TokenType::Plus => UnaryOp::Plus,
            TokenType::Minus => UnaryOp::Minus,
            TokenType::Bang => UnaryOp::LogicalNot,
            TokenType::Tilde => UnaryOp::BitNot,
            TokenType::Sizeof => return self.parse_sizeof(),
            TokenType::Alignof => return self.parse_alignof(),
            TokenType::New => return self.parse_new_expression(),
            TokenType::Delete => return self.parse_delete_expression(),
            TokenType::ColonColon if self.check_nth(1, &TokenType::New) => return self.parse_new_expression(),
            TokenType::ColonColon if self.check_nth(1, &TokenType::Delete) => {
                return self.parse_delete_expression()
            }
            _ => return self.parse_postfix_expression(),
        };

        self.advance();
        let operand = self.require(&format!("operand of `{op}`"), |p| p.parse_cast_expression())?;
        let span = self.span_from(&start);
        Ok(self.unary(op, operand, span))
    }

    pub(crate) fn unary(&mut self, op: UnaryOp, operand: Expression, span: SourceSpan) -> Expression {
        self.node(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// `sizeof(type-id)` is tried before `sizeof unary-expression`
    fn parse_sizeof(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::Sizeof, "sizeof expression")?.span;

        if self.check(&TokenType::LeftParen) {
            let type_id = self.attempt(|p| {
                p.advance();
                let type_id = p.with_mode(ParseMode::Expression, |p| p.parse_type_id())?;
                p.expect(TokenType::RightParen, "`sizeof`")?;
                Ok(type_id)
            })?;
            if let Some(type_id) = type_id {
                let span = self.span_from(&start);
                return Ok(self.node(ExpressionKind::Sizeof(TypeOrExpression::Type(type_id)), span));
            }
        }

        let operand = self.descend(|p| p.require("operand of `sizeof`", |p| p.parse_unary_expression()))?;
        let span = self.span_from(&start);
        Ok(self.node(
            ExpressionKind::Sizeof(TypeOrExpression::Expression(Box::new(operand))),
            span,
        ))
    }

    fn parse_alignof(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::Alignof, "alignof expression")?.span;
        self.require_token(TokenType::LeftParen, "`alignof`")?;
        let type_id = self.with_mode(ParseMode::Expression, |p| {
            p.require("type in `alignof`", |p| p.parse_type_id())
        })?;
        self.require_token(TokenType::RightParen, "`alignof`")?;
        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Alignof(type_id), span))
    }
}
