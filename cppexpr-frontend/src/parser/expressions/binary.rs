//! Binary expression parsing with operator precedence
//!
//! One method per tier, lowest precedence first. Every tier folds to the
//! left and asks the parsing context before consuming its operator.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};
use cppexpr_common::SourceSpan;

type Operand = fn(&mut Parser) -> Result<Expression, ParseError>;
type Operator = fn(&mut Parser) -> Option<BinaryOp>;

impl Parser {
    /// `operand (operator operand)*`, nested as `((a op b) op c)`
    pub(crate) fn fold_left(&mut self, operand: Operand, operator: Operator) -> Result<Expression, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = operator(self) {
            let right = self.require(&format!("right operand of `{op}`"), operand)?;
            let span = SourceSpan::new(left.span.start.clone(), right.span.end.clone());
            left = self.node(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Consume `tokens` tokens as `op` unless the current mode forbids it
    fn accept_operator(&mut self, op: BinaryOp, tokens: usize) -> Option<BinaryOp> {
        if self.context.suppresses(op) {
            return None;
        }
        for _ in 0..tokens {
            self.advance();
        }
        Some(op)
    }

    pub(crate) fn comma_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Comma => self.accept_operator(BinaryOp::Comma, 1),
            _ => None,
        }
    }

    fn logical_or_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::PipePipe => self.accept_operator(BinaryOp::LogicalOr, 1),
            _ => None,
        }
    }

    fn logical_and_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::AmpersandAmpersand => self.accept_operator(BinaryOp::LogicalAnd, 1),
            _ => None,
        }
    }

    fn inclusive_or_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Pipe => self.accept_operator(BinaryOp::BitOr, 1),
            _ => None,
        }
    }

    fn exclusive_or_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Caret => self.accept_operator(BinaryOp::BitXor, 1),
            _ => None,
        }
    }

    fn and_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Ampersand => self.accept_operator(BinaryOp::BitAnd, 1),
            _ => None,
        }
    }

    fn equality_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::EqualEqual => self.accept_operator(BinaryOp::Equal, 1),
            TokenType::BangEqual => self.accept_operator(BinaryOp::NotEqual, 1),
            _ => None,
        }
    }

    /// A `>` that starts `>>` or `>>=` belongs to the shift and assignment
    /// tiers.
    fn relational_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Less => self.accept_operator(BinaryOp::Less, 1),
            TokenType::LessEqual => self.accept_operator(BinaryOp::LessEqual, 1),
            TokenType::GreaterEqual => self.accept_operator(BinaryOp::GreaterEqual, 1),
            TokenType::Greater if !self.at_right_shift() && !self.at_right_shift_assign() => {
                self.accept_operator(BinaryOp::Greater, 1)
            }
            _ => None,
        }
    }

    /// `<<=` is a single token and never reaches this tier
    fn shift_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::LeftShift => self.accept_operator(BinaryOp::LeftShift, 1),
            TokenType::Greater if self.at_right_shift() => self.accept_operator(BinaryOp::RightShift, 2),
            _ => None,
        }
    }

    fn additive_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Plus => self.accept_operator(BinaryOp::Add, 1),
            TokenType::Minus => self.accept_operator(BinaryOp::Sub, 1),
            _ => None,
        }
    }

    fn multiplicative_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::Star => self.accept_operator(BinaryOp::Mul, 1),
            TokenType::Slash => self.accept_operator(BinaryOp::Div, 1),
            TokenType::Percent => self.accept_operator(BinaryOp::Mod, 1),
            _ => None,
        }
    }

    fn pm_operator(&mut self) -> Option<BinaryOp> {
        match self.peek_type() {
            TokenType::DotStar => self.accept_operator(BinaryOp::PtrMemDot, 1),
            TokenType::ArrowStar => self.accept_operator(BinaryOp::PtrMemArrow, 1),
            _ => None,
        }
    }

    /// Parse conditional expression (ternary operator)
    pub fn parse_conditional_expression(&mut self) -> Result<Expression, ParseError> {
        let condition = self.parse_logical_or_expression()?;

        if !self.match_token(&TokenType::Question) {
            return Ok(condition);
        }

        let then_expr = self.with_mode(ParseMode::Expression, |p| {
            p.require("expression after `?`", |p| p.parse_expression())
        })?;
        self.require_token(TokenType::Colon, "conditional expression")?;
        let else_expr = self.require("expression after `:`", |p| p.parse_assignment_expression())?;

        let span = SourceSpan::new(condition.span.start.clone(), else_expr.span.end.clone());
        Ok(self.node(
            ExpressionKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    pub fn parse_logical_or_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_logical_and_expression, Self::logical_or_operator)
    }

    pub fn parse_logical_and_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_inclusive_or_expression, Self::logical_and_operator)
    }

    pub fn parse_inclusive_or_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_exclusive_or_expression, Self::inclusive_or_operator)
    }

    pub fn parse_exclusive_or_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_and_expression, Self::exclusive_or_operator)
    }

    pub fn parse_and_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_equality_expression, Self::and_operator)
    }

    pub fn parse_equality_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_relational_expression, Self::equality_operator)
    }

    pub fn parse_relational_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_shift_expression, Self::relational_operator)
    }

    pub fn parse_shift_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_additive_expression, Self::shift_operator)
    }

    pub fn parse_additive_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_multiplicative_expression, Self::additive_operator)
    }

    pub fn parse_multiplicative_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_pm_expression, Self::multiplicative_operator)
    }

    /// `.*` and `->*` over cast expressions
    pub fn parse_pm_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_cast_expression, Self::pm_operator)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::{ParseMode, Parser, ParsingContext};
    use pretty_assertions::assert_eq;

    fn sexpr(input: &str) -> String {
        let mut lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer.tokenize().unwrap());
        parser.parse().unwrap().to_sexpr()
    }

    #[test]
    fn test_every_tier_folds_left() {
        let cases = [
            ("a || b || c", "(|| (|| a b) c)"),
            ("a && b && c", "(&& (&& a b) c)"),
            ("a | b | c", "(| (| a b) c)"),
            ("a ^ b ^ c", "(^ (^ a b) c)"),
            ("a & b & c", "(& (& a b) c)"),
            ("a == b != c", "(!= (== a b) c)"),
            ("a < b <= c", "(<= (< a b) c)"),
            ("a << b >> c", "(>> (<< a b) c)"),
            ("a - b + c", "(+ (- a b) c)"),
            ("a / b * c", "(* (/ a b) c)"),
            ("a .* b ->* c", "(->* (.* a b) c)"),
            ("a, b, c", "(comma (comma a b) c)"),
        ];
        for (input, expected) in cases {
            assert_eq!(sexpr(input), expected, "{input}");
        }
    }

    #[test]
    fn test_tiers_nest_by_precedence() {
        assert_eq!(sexpr("a || b && c | d ^ e & f"), "(|| a (&& b (| c (^ d (& e f)))))");
        assert_eq!(sexpr("a == b < c << d + e * f"), "(== a (< b (<< c (+ d (* e f)))))");
    }

    #[test]
    fn test_separated_angles_are_comparisons() {
        assert_eq!(sexpr("a > b >= c"), "(>= (> a b) c)");

        let mut lexer = Lexer::new("a > > b");
        let mut parser = Parser::new(lexer.tokenize().unwrap());
        assert!(parser.parse().is_err());
    }

    #[test]
    fn test_conditional_else_nests_right() {
        assert_eq!(sexpr("a ? b : c ? d : e"), "(? a b (? c d e))");
        assert_eq!(sexpr("a ? b, c : d"), "(? a (comma b c) d)");
    }

    #[test]
    fn test_template_arguments_mode_leaves_closing_angle() {
        let mut lexer = Lexer::new("a > b");
        let mut parser = Parser::new(lexer.tokenize().unwrap());
        parser.context.push(ParseMode::TemplateArguments);
        let expr = parser.parse_conditional_expression().unwrap();
        assert_eq!(expr.to_sexpr(), "a");
        assert!(parser.check(&crate::lexer::TokenType::Greater));

        let mut lexer = Lexer::new("(a > b)");
        let mut parser = Parser::new(lexer.tokenize().unwrap()).with_context(ParsingContext::in_template_arguments());
        assert_eq!(parser.parse().unwrap().to_sexpr(), "(paren (> a b))");
    }

    #[test]
    fn test_missing_right_operand_is_hard() {
        let mut lexer = Lexer::new("a * ");
        let mut parser = Parser::new(lexer.tokenize().unwrap());
        let err = parser.parse_expression().unwrap_err();
        assert!(!err.is_soft());
        assert_eq!(err.to_string(), "expected right operand of `*`, found `end of input`");
    }
}
