//! `new` and `delete` expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};

impl Parser {
    /// `[::] new [(placement)] type [initializer]`
    ///
    /// `new (x) ...` opens either a placement list or a parenthesised type.
    /// The parentheses are read as a type-id first; they are a placement
    /// list instead when the type-id could be a value and another type
    /// follows them.
    pub fn parse_new_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();
        let global = self.match_token(&TokenType::ColonColon);
        self.expect(TokenType::New, "new expression")?;

        let mut placement = None;
        let mut target = None;
        if self.check(&TokenType::LeftParen) {
            let after_new = self.checkpoint();
            if let Some(type_id) = self.attempt(|p| p.parse_parenthesized_type_id())? {
                if type_id.could_be_expression() && self.new_type_follows()? {
                    self.rewind(after_new);
                } else {
                    target = Some(NewTarget::Parenthesized(type_id));
                }
            }
            if target.is_none() {
                placement = Some(self.require("placement arguments", |p| p.parse_argument_list())?);
            }
        }

        let target = match target {
            Some(target) => target,
            None => self.require("type after `new`", |p| p.parse_new_target())?,
        };

        let initializer = match self.peek_type() {
            TokenType::LeftParen | TokenType::LeftBrace => Some(self.parse_initializer()?),
            _ => None,
        };

        let span = self.span_from(&start);
        Ok(self.node(
            ExpressionKind::New(NewExpression {
                global,
                placement,
                target,
                initializer,
            }),
            span,
        ))
    }

    /// After `new (x)`: does a type to allocate come next?
    fn new_type_follows(&mut self) -> Result<bool, ParseError> {
        if self.check(&TokenType::LeftParen) {
            return self.lookahead(|p| p.parse_parenthesized_type_id());
        }
        Ok(self.at_type_specifier())
    }

    fn parse_parenthesized_type_id(&mut self) -> Result<TypeId, ParseError> {
        self.expect(TokenType::LeftParen, "parenthesized type")?;
        let type_id = self.with_mode(ParseMode::Expression, |p| p.parse_type_id())?;
        self.expect(TokenType::RightParen, "parenthesized type")?;
        Ok(type_id)
    }

    fn parse_new_target(&mut self) -> Result<NewTarget, ParseError> {
        if self.check(&TokenType::LeftParen) {
            Ok(NewTarget::Parenthesized(self.parse_parenthesized_type_id()?))
        } else {
            Ok(NewTarget::Bare(self.parse_new_type_id()?))
        }
    }

    /// `[::] delete [[]] cast-expression`
    pub fn parse_delete_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();
        let global = self.match_token(&TokenType::ColonColon);
        self.expect(TokenType::Delete, "delete expression")?;

        let array = self.check(&TokenType::LeftBracket) && self.check_nth(1, &TokenType::RightBracket);
        if array {
            self.advance();
            self.advance();
        }

        let operand = self.require("operand of `delete`", |p| p.parse_cast_expression())?;
        let span = self.span_from(&start);
        Ok(self.node(
            ExpressionKind::Delete {
                global,
                array,
                operand: Box::new(operand),
            },
            span,
        ))
    }
}
