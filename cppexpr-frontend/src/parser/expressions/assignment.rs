//! Assignment and throw expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseMode, Parser};
use cppexpr_common::SourceSpan;

impl Parser {
    /// Parse assignment expression
    ///
    /// `throw`, then `lvalue op= initializer-clause`, then a conditional
    /// expression. The lvalue candidate is parsed with `ParseMode::Lvalue`
    /// pushed, which stops every value tier below it from consuming its
    /// operator.
    pub fn parse_assignment_expression(&mut self) -> Result<Expression, ParseError> {
        self.descend(|p| {
            if p.check(&TokenType::Throw) {
                return p.parse_throw_expression();
            }
            if let Some(assignment) = p.attempt(|p| p.parse_assignment_form())? {
                return Ok(assignment);
            }
            p.parse_conditional_expression()
        })
    }

    fn parse_assignment_form(&mut self) -> Result<Expression, ParseError> {
        let target = self.with_mode(ParseMode::Lvalue, |p| p.parse_logical_or_expression())?;

        let Some(op) = self.assignment_operator() else {
            return Err(self.unexpected("assignment operator"));
        };

        let value = self.require(&format!("right operand of `{op}`"), |p| p.parse_initializer_clause())?;
        let span = SourceSpan::new(target.span.start.clone(), value.span.end.clone());
        Ok(self.node(
            ExpressionKind::Binary {
                op,
                left: Box::new(target),
                right: Box::new(value),
            },
            span,
        ))
    }

    /// Parse assignment operator; `==` is a different token and never matches
    fn assignment_operator(&mut self) -> Option<BinaryOp> {
        let (op, tokens) = match self.peek_type() {
            TokenType::Equal => (BinaryOp::Assign, 1),
            TokenType::PlusEqual => (BinaryOp::AddAssign, 1),
            TokenType::MinusEqual => (BinaryOp::SubAssign, 1),
            TokenType::StarEqual => (BinaryOp::MulAssign, 1),
            TokenType::SlashEqual => (BinaryOp::DivAssign, 1),
            TokenType::PercentEqual => (BinaryOp::ModAssign, 1),
            TokenType::AmpersandEqual => (BinaryOp::BitAndAssign, 1),
            TokenType::PipeEqual => (BinaryOp::BitOrAssign, 1),
            TokenType::CaretEqual => (BinaryOp::BitXorAssign, 1),
            TokenType::LeftShiftEqual => (BinaryOp::LeftShiftAssign, 1),
            TokenType::Greater if self.at_right_shift_assign() => (BinaryOp::RightShiftAssign, 2),
            _ => return None,
        };
        for _ in 0..tokens {
            self.advance();
        }
        Some(op)
    }

    /// `throw` with an optional operand
    fn parse_throw_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::Throw, "throw expression")?.span;
        let operand = self.attempt(|p| p.parse_assignment_expression())?;
        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Throw(operand.map(Box::new)), span))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use cppexpr_common::CompilerError;
    use pretty_assertions::assert_eq;

    fn sexpr(input: &str) -> Result<String, CompilerError> {
        let mut lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer.tokenize()?);
        Ok(parser.parse()?.to_sexpr())
    }

    #[test]
    fn test_assignment_groups_right() {
        assert_eq!(sexpr("a = b = c").unwrap(), "(= a (= b c))");
        assert_eq!(sexpr("a += b -= 1").unwrap(), "(+= a (-= b 1))");
    }

    #[test]
    fn test_assignment_versus_equality() {
        assert_eq!(sexpr("a = b").unwrap(), "(= a b)");
        assert_eq!(sexpr("a == b").unwrap(), "(== a b)");
    }

    #[test]
    fn test_compound_shift_assignments() {
        assert_eq!(sexpr("a <<= 2").unwrap(), "(<<= a 2)");
        assert_eq!(sexpr("a >>= 2").unwrap(), "(>>= a 2)");
        assert!(sexpr("a > >= 2").is_err());
    }

    #[test]
    fn test_assignment_inside_conditional_branch() {
        assert_eq!(sexpr("c ? a : b = 1").unwrap(), "(? c a (= b 1))");
    }

    #[test]
    fn test_lvalue_candidate_stops_at_value_operators() {
        assert_eq!(sexpr("p->*m = v").unwrap(), "(= (->* p m) v)");
        assert!(sexpr("a + b = c").is_err());
    }

    #[test]
    fn test_assignment_from_braced_list() {
        assert_eq!(sexpr("v = {1, 2}").unwrap(), "(= v (braced 1 2))");
    }

    #[test]
    fn test_throw() {
        assert_eq!(sexpr("throw").unwrap(), "(throw)");
        assert_eq!(sexpr("throw e").unwrap(), "(throw e)");
        assert_eq!(sexpr("c ? throw x : y").unwrap(), "(? c (throw x) y)");
    }
}
