//! Name parsing
//!
//! Identifiers, template-ids, `operator` function names, destructor names
//! and `::` qualified chains.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};

/// Where a name appears. In an expression, `a < b > c` must stay a pair of
/// comparisons, so a template argument list is only accepted there when
/// the token after the closing `>` could not start an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Expression,
    Type,
}

/// Operators spelled with one token after the `operator` keyword
fn single_token_operator(token: &TokenType) -> Option<OverloadableOperator> {
    let binary = match token {
        TokenType::Plus => BinaryOp::Add,
        TokenType::Minus => BinaryOp::Sub,
        TokenType::Star => BinaryOp::Mul,
        TokenType::Slash => BinaryOp::Div,
        TokenType::Percent => BinaryOp::Mod,
        TokenType::Ampersand => BinaryOp::BitAnd,
        TokenType::Pipe => BinaryOp::BitOr,
        TokenType::Caret => BinaryOp::BitXor,
        TokenType::LeftShift => BinaryOp::LeftShift,
        TokenType::AmpersandAmpersand => BinaryOp::LogicalAnd,
        TokenType::PipePipe => BinaryOp::LogicalOr,
        TokenType::EqualEqual => BinaryOp::Equal,
        TokenType::BangEqual => BinaryOp::NotEqual,
        TokenType::Less => BinaryOp::Less,
        TokenType::LessEqual => BinaryOp::LessEqual,
        TokenType::GreaterEqual => BinaryOp::GreaterEqual,
        TokenType::Equal => BinaryOp::Assign,
        TokenType::PlusEqual => BinaryOp::AddAssign,
        TokenType::MinusEqual => BinaryOp::SubAssign,
        TokenType::StarEqual => BinaryOp::MulAssign,
        TokenType::SlashEqual => BinaryOp::DivAssign,
        TokenType::PercentEqual => BinaryOp::ModAssign,
        TokenType::AmpersandEqual => BinaryOp::BitAndAssign,
        TokenType::PipeEqual => BinaryOp::BitOrAssign,
        TokenType::CaretEqual => BinaryOp::BitXorAssign,
        TokenType::LeftShiftEqual => BinaryOp::LeftShiftAssign,
        TokenType::ArrowStar => BinaryOp::PtrMemArrow,
        TokenType::Comma => BinaryOp::Comma,
        TokenType::Bang => return Some(OverloadableOperator::Unary(UnaryOp::LogicalNot)),
        TokenType::Tilde => return Some(OverloadableOperator::Unary(UnaryOp::BitNot)),
        TokenType::PlusPlus => return Some(OverloadableOperator::Unary(UnaryOp::PreIncrement)),
        TokenType::MinusMinus => return Some(OverloadableOperator::Unary(UnaryOp::PreDecrement)),
        TokenType::Arrow => return Some(OverloadableOperator::Arrow),
        _ => return None,
    };
    Some(OverloadableOperator::Binary(binary))
}

impl Parser {
    /// Parse a possibly qualified name
    pub fn parse_id_expression(&mut self, context: NameContext) -> Result<IdExpression, ParseError> {
        let mut id = if self.match_token(&TokenType::ColonColon) {
            let template_keyword = self.match_token(&TokenType::Template);
            let name = self.require("name after `::`", |p| p.parse_unqualified_id(context))?;
            IdExpression::Nested { scope: None, template_keyword, name }
        } else {
            IdExpression::Unqualified(self.parse_unqualified_id(context)?)
        };

        while self.continues_qualification(&id) {
            self.advance();
            let template_keyword = self.match_token(&TokenType::Template);
            let name = self.require("name after `::`", |p| p.parse_unqualified_id(context))?;
            id = IdExpression::Nested {
                scope: Some(Box::new(id)),
                template_keyword,
                name,
            };
        }

        Ok(id)
    }

    /// `::` after a class or namespace name, followed by another component.
    /// `C::*` is left for the pointer-to-member declarator.
    fn continues_qualification(&self, id: &IdExpression) -> bool {
        self.check(&TokenType::ColonColon)
            && matches!(id.name(), UnqualifiedId::Identifier(_) | UnqualifiedId::Template(_))
            && matches!(
                self.peek_nth(1).token_type,
                TokenType::Identifier(_) | TokenType::Template | TokenType::Tilde | TokenType::Operator
            )
    }

    pub fn parse_unqualified_id(&mut self, context: NameContext) -> Result<UnqualifiedId, ParseError> {
        match self.peek_type().clone() {
            TokenType::Identifier(name) => {
                self.advance();
                if self.check(&TokenType::Less) {
                    if let Some(arguments) = self.attempt(|p| p.parse_template_argument_list(context))? {
                        return Ok(UnqualifiedId::Template(TemplateId { name, arguments }));
                    }
                }
                Ok(UnqualifiedId::Identifier(name))
            }
            TokenType::Tilde => match self.peek_nth(1).token_type.clone() {
                TokenType::Identifier(name) => {
                    self.advance();
                    self.advance();
                    Ok(UnqualifiedId::Destructor(name))
                }
                _ => Err(self.unexpected("a name")),
            },
            TokenType::Operator => {
                self.advance();
                self.require("operator after `operator`", |p| p.parse_operator_function_id())
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Everything after the `operator` keyword
    fn parse_operator_function_id(&mut self) -> Result<UnqualifiedId, ParseError> {
        let brackets_follow = |p: &Self| {
            p.check_nth(1, &TokenType::LeftBracket) && p.check_nth(2, &TokenType::RightBracket)
        };

        let (operator, tokens) = match self.peek_type().clone() {
            TokenType::New if brackets_follow(self) => (OverloadableOperator::NewArray, 3),
            TokenType::New => (OverloadableOperator::New, 1),
            TokenType::Delete if brackets_follow(self) => (OverloadableOperator::DeleteArray, 3),
            TokenType::Delete => (OverloadableOperator::Delete, 1),
            TokenType::LeftParen if self.check_nth(1, &TokenType::RightParen) => (OverloadableOperator::Call, 2),
            TokenType::LeftBracket if self.check_nth(1, &TokenType::RightBracket) => {
                (OverloadableOperator::Subscript, 2)
            }
            TokenType::Greater if self.at_right_shift_assign() => {
                (OverloadableOperator::Binary(BinaryOp::RightShiftAssign), 2)
            }
            TokenType::Greater if self.at_right_shift() => (OverloadableOperator::Binary(BinaryOp::RightShift), 2),
            TokenType::Greater => (OverloadableOperator::Binary(BinaryOp::Greater), 1),
            token => match single_token_operator(&token) {
                Some(operator) => (operator, 1),
                None => {
                    let type_id = self.parse_conversion_type_id()?;
                    return Ok(UnqualifiedId::ConversionFunction(Box::new(type_id)));
                }
            },
        };

        for _ in 0..tokens {
            self.advance();
        }
        Ok(UnqualifiedId::OperatorFunction(operator))
    }

    /// `< arguments >`, closed by a single `>`
    pub fn parse_template_argument_list(
        &mut self,
        context: NameContext,
    ) -> Result<Vec<TemplateArgument>, ParseError> {
        self.expect(TokenType::Less, "template argument list")?;

        let arguments = self.descend(|p| {
            let mut arguments = Vec::new();
            if !p.check(&TokenType::Greater) {
                loop {
                    arguments.push(p.with_mode(ParseMode::TemplateArguments, |p| p.parse_template_argument())?);
                    if !p.match_token(&TokenType::Comma) {
                        break;
                    }
                }
            }
            Ok(arguments)
        })?;
        self.expect(TokenType::Greater, "template argument list")?;

        if context == NameContext::Expression && self.starts_operand_after_template() {
            return Err(self.unexpected("operator after template argument list"));
        }
        Ok(arguments)
    }

    fn starts_operand_after_template(&self) -> bool {
        let token = self.peek_type();
        token.is_literal()
            || matches!(
                token,
                TokenType::Identifier(_) | TokenType::This | TokenType::Bang | TokenType::Tilde
            )
    }

    /// A type when a whole type-id fits before `,` or `>`, else an expression
    fn parse_template_argument(&mut self) -> Result<TemplateArgument, ParseError> {
        let type_id = self.attempt(|p| {
            let type_id = p.parse_type_id()?;
            if p.check(&TokenType::Comma) || p.check(&TokenType::Greater) {
                Ok(type_id)
            } else {
                Err(p.unexpected("`,` or `>` after template argument"))
            }
        })?;

        match type_id {
            Some(type_id) => Ok(TemplateArgument::Type(type_id)),
            None => {
                let expr = self.parse_conditional_expression()?;
                Ok(TemplateArgument::Expression(Box::new(expr)))
            }
        }
    }
}
