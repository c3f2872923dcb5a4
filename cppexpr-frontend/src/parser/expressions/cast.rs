//! C-style cast parsing
//!
//! `(T) x` shares its opening with `(a) * b` and `(f)(x)`. A parenthesised
//! type-id that could also be read as an expression only counts as a cast
//! when the next token can begin nothing but an operand.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::types::fundamental_type;
use crate::parser::{ParseError, ParseMode, Parser};

impl Parser {
    /// Parse cast expression
    ///
    /// Results are cached per start token: every construct nested inside a
    /// cast expression pushes its own parsing mode, so the outcome does not
    /// depend on the surrounding one.
    pub fn parse_cast_expression(&mut self) -> Result<Expression, ParseError> {
        let position = self.checkpoint();
        if let Some(cached) = self.memo_lookup(position) {
            return cached;
        }

        let result = self.descend(|p| {
            if p.check(&TokenType::LeftParen) {
                if let Some(cast) = p.attempt(|p| p.parse_c_style_cast())? {
                    return Ok(cast);
                }
            }
            p.parse_unary_expression()
        });

        self.memo_store(position, &result);
        result
    }

    fn parse_c_style_cast(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::LeftParen, "cast")?.span;
        let target_type = self.with_mode(ParseMode::Expression, |p| p.parse_type_id())?;
        self.expect(TokenType::RightParen, "cast")?;

        if target_type.could_be_expression() && !self.starts_operand_only() {
            return Err(self.unexpected("operand of cast"));
        }

        let operand = self.require("operand of cast", |p| p.parse_cast_expression())?;
        let span = self.span_from(&start);
        Ok(self.node(
            ExpressionKind::Cast {
                target_type,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Tokens that can start an operand but never continue an expression,
    /// so `(T)` before them cannot be a parenthesised value
    fn starts_operand_only(&self) -> bool {
        let token = self.peek_type();
        token.is_literal()
            || fundamental_type(token).is_some()
            || matches!(
                token,
                TokenType::Identifier(_)
                    | TokenType::This
                    | TokenType::Bang
                    | TokenType::Tilde
                    | TokenType::Sizeof
                    | TokenType::Alignof
                    | TokenType::New
                    | TokenType::Delete
                    | TokenType::Typeid
                    | TokenType::StaticCast
                    | TokenType::DynamicCast
                    | TokenType::ReinterpretCast
                    | TokenType::ConstCast
                    | TokenType::ColonColon
                    | TokenType::Typename
                    | TokenType::Decltype
            )
    }
}
