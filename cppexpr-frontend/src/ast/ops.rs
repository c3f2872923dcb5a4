//! Operator definitions for C++ expressions
//!
//! This module defines binary, unary, and cast operators, plus the operator
//! tokens that may follow the `operator` keyword in a function name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add, Sub, Mul, Div, Mod,

    // Bitwise
    BitAnd, BitOr, BitXor, LeftShift, RightShift,

    // Logical
    LogicalAnd, LogicalOr,

    // Comparison
    Equal, NotEqual, Less, Greater, LessEqual, GreaterEqual,

    // Assignment
    Assign,
    AddAssign, SubAssign, MulAssign, DivAssign, ModAssign,
    BitAndAssign, BitOrAssign, BitXorAssign, LeftShiftAssign, RightShiftAssign,

    // Pointer-to-member (`.*`, `->*`)
    PtrMemDot, PtrMemArrow,

    // Sequencing
    Comma,
}

impl BinaryOp {
    /// Binding strength, higher binds tighter. The parser encodes precedence
    /// structurally; this is only used when printing and dumping trees.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Comma => 1,
            op if op.is_assignment() => 2,
            BinaryOp::LogicalOr => 4,
            BinaryOp::LogicalAnd => 5,
            BinaryOp::BitOr => 6,
            BinaryOp::BitXor => 7,
            BinaryOp::BitAnd => 8,
            BinaryOp::Equal | BinaryOp::NotEqual => 9,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => 10,
            BinaryOp::LeftShift | BinaryOp::RightShift => 11,
            BinaryOp::Add | BinaryOp::Sub => 12,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 13,
            BinaryOp::PtrMemDot | BinaryOp::PtrMemArrow => 14,
            _ => 0,
        }
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
                | BinaryOp::ModAssign
                | BinaryOp::BitAndAssign
                | BinaryOp::BitOrAssign
                | BinaryOp::BitXorAssign
                | BinaryOp::LeftShiftAssign
                | BinaryOp::RightShiftAssign
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::ModAssign => "%=",
            BinaryOp::BitAndAssign => "&=",
            BinaryOp::BitOrAssign => "|=",
            BinaryOp::BitXorAssign => "^=",
            BinaryOp::LeftShiftAssign => "<<=",
            BinaryOp::RightShiftAssign => ">>=",
            BinaryOp::PtrMemDot => ".*",
            BinaryOp::PtrMemArrow => "->*",
            BinaryOp::Comma => ",",
        };
        write!(f, "{}", op_str)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    // Arithmetic
    Plus, Minus,

    // Bitwise
    BitNot,

    // Logical
    LogicalNot,

    // Pointer/address
    Dereference, AddressOf,

    // Pre/post increment/decrement
    PreIncrement, PostIncrement,
    PreDecrement, PostDecrement,
}

impl UnaryOp {
    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::LogicalNot => "!",
            UnaryOp::Dereference => "*",
            UnaryOp::AddressOf => "&",
            UnaryOp::PreIncrement => "++",
            UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement => "--",
            UnaryOp::PostDecrement => "--",
        };
        write!(f, "{}", op_str)
    }
}

/// Named casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastKind {
    Static,
    Dynamic,
    Reinterpret,
    Const,
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            CastKind::Static => "static_cast",
            CastKind::Dynamic => "dynamic_cast",
            CastKind::Reinterpret => "reinterpret_cast",
            CastKind::Const => "const_cast",
        };
        write!(f, "{}", keyword)
    }
}

/// Operators that can be named by an operator-function-id (`operator+=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverloadableOperator {
    New, Delete, NewArray, DeleteArray,
    Binary(BinaryOp),
    /// `++`/`--` and the other prefix spellings
    Unary(UnaryOp),
    Call,
    Subscript,
    Arrow,
}

impl fmt::Display for OverloadableOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverloadableOperator::New => write!(f, "new"),
            OverloadableOperator::Delete => write!(f, "delete"),
            OverloadableOperator::NewArray => write!(f, "new[]"),
            OverloadableOperator::DeleteArray => write!(f, "delete[]"),
            OverloadableOperator::Binary(op) => write!(f, "{}", op),
            OverloadableOperator::Unary(op) => write!(f, "{}", op),
            OverloadableOperator::Call => write!(f, "()"),
            OverloadableOperator::Subscript => write!(f, "[]"),
            OverloadableOperator::Arrow => write!(f, "->"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_display() {
        assert_eq!(format!("{}", BinaryOp::Add), "+");
        assert_eq!(format!("{}", BinaryOp::Equal), "==");
        assert_eq!(format!("{}", BinaryOp::LogicalAnd), "&&");
        assert_eq!(format!("{}", BinaryOp::PtrMemArrow), "->*");
        assert_eq!(format!("{}", BinaryOp::RightShiftAssign), ">>=");
    }

    #[test]
    fn test_unary_op_display() {
        assert_eq!(format!("{}", UnaryOp::Minus), "-");
        assert_eq!(format!("{}", UnaryOp::Dereference), "*");
        assert_eq!(format!("{}", UnaryOp::LogicalNot), "!");
        assert_eq!(format!("{}", UnaryOp::PostDecrement), "--");
    }

    #[test]
    fn test_precedence_orders_tiers() {
        assert!(BinaryOp::Comma.precedence() < BinaryOp::Assign.precedence());
        assert!(BinaryOp::LogicalOr.precedence() < BinaryOp::LogicalAnd.precedence());
        assert!(BinaryOp::Equal.precedence() < BinaryOp::Less.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() < BinaryOp::PtrMemDot.precedence());
        assert_eq!(BinaryOp::ModAssign.precedence(), BinaryOp::Assign.precedence());
    }

    #[test]
    fn test_overloadable_operator_display() {
        assert_eq!(OverloadableOperator::NewArray.to_string(), "new[]");
        assert_eq!(OverloadableOperator::Binary(BinaryOp::LeftShiftAssign).to_string(), "<<=");
        assert_eq!(OverloadableOperator::Call.to_string(), "()");
        assert_eq!(CastKind::Reinterpret.to_string(), "reinterpret_cast");
    }
}
