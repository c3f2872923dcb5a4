//! Expression parsing for C++
//!
//! One function per precedence tier, from the comma operator down to
//! primary expressions. Binary tiers fold left; assignment and the
//! conditional operator group to the right.

mod assignment;
mod binary;
mod cast;
mod new_delete;
mod postfix;
mod primary;
mod unary;

use crate::ast::*;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse expression (top level), including the comma operator
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.fold_left(Self::parse_assignment_expression, Self::comma_operator)
    }
}
