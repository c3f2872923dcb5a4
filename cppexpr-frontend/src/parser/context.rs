//! Parsing context
//!
//! A stack of modes threaded through the descent. Rules push a mode before
//! entering a sub-rule and pop it on every exit path (see
//! `Parser::with_mode`). The innermost mode alone decides which infix
//! operators a tier may consume, so parentheses and brackets, which push
//! `Expression`, shield their contents from an enclosing restriction.

use crate::ast::BinaryOp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// No restriction
    Expression,
    /// Candidate left-hand side of an assignment
    Lvalue,
    /// Inside `< ... >`; a bare `>` or `>>` closes the list
    TemplateArguments,
    /// Inside a call or placement argument list
    Arguments,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingContext {
    modes: Vec<ParseMode>,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context for parsing a single template argument
    pub fn in_template_arguments() -> Self {
        Self {
            modes: vec![ParseMode::TemplateArguments],
        }
    }

    pub fn push(&mut self, mode: ParseMode) {
        self.modes.push(mode);
    }

    pub fn pop(&mut self) -> Option<ParseMode> {
        self.modes.pop()
    }

    pub fn depth(&self) -> usize {
        self.modes.len()
    }

    pub fn current(&self) -> ParseMode {
        self.modes.last().copied().unwrap_or(ParseMode::Expression)
    }

    pub fn parsing_lvalue(&self) -> bool {
        self.current() == ParseMode::Lvalue
    }

    pub fn parsing_template_arguments(&self) -> bool {
        self.current() == ParseMode::TemplateArguments
    }

    pub fn parsing_arguments(&self) -> bool {
        self.current() == ParseMode::Arguments
    }

    /// Whether a tier must leave `op` unconsumed in the current mode
    pub fn suppresses(&self, op: BinaryOp) -> bool {
        match self.current() {
            ParseMode::Lvalue => !matches!(
                op,
                BinaryOp::PtrMemDot | BinaryOp::PtrMemArrow | BinaryOp::Comma
            ) && !op.is_assignment(),
            ParseMode::TemplateArguments => matches!(op, BinaryOp::Greater | BinaryOp::RightShift),
            ParseMode::Expression | ParseMode::Arguments => false,
        }
    }
}
