//! Expression AST nodes for C++
//!
//! This module defines expression nodes in the abstract syntax tree.
//! Every node owns its children; the tree has no sharing and no cycles.

use super::names::IdExpression;
use super::ops::{BinaryOp, CastKind, UnaryOp};
use super::types::{NewTypeId, TypeId, TypeSpecifier};
use crate::ast::NodeId;
use cppexpr_common::{HasSpan, SourceSpan};
use serde::{Deserialize, Serialize};

/// AST Expression nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub node_id: NodeId,
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Literal(Literal),

    /// Identifier, qualified name, template-id, or special function name
    Id(IdExpression),

    This,

    /// Explicit parentheses, kept so grouping survives printing
    Paren(Box<Expression>),

    /// Prefix and postfix unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    /// Every infix tier, from comma down to pointer-to-member
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Ternary conditional operator (condition ? then_expr : else_expr)
    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },

    /// C-style cast `(T) operand`
    Cast {
        target_type: TypeId,
        operand: Box<Expression>,
    },

    /// `static_cast<T>(operand)` and friends
    CppCast {
        kind: CastKind,
        target_type: TypeId,
        operand: Box<Expression>,
    },

    Sizeof(TypeOrExpression),

    Alignof(TypeId),

    Typeid(TypeOrExpression),

    New(NewExpression),

    Delete {
        global: bool,
        array: bool,
        operand: Box<Expression>,
    },

    /// Subscript `base[index]`
    Index {
        base: Box<Expression>,
        index: Box<Expression>,
    },

    /// Function call
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// Member access
    Member {
        object: Box<Expression>,
        member: IdExpression,
        is_pointer: bool, // true for ->, false for .
    },

    /// `throw` with an optional operand
    Throw(Option<Box<Expression>>),

    /// Explicit type conversion in functional notation: `int(x)`, `T{1, 2}`
    Construct {
        target: TypeSpecifier,
        initializer: Initializer,
    },

    /// Braced initializer list in an initializer-clause position
    InitializerList(Vec<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Spelling in the source, used when printing
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralKind {
    Integer(u64),
    Floating(f64),
    Character(u32),
    String(String),
    Boolean(bool),
    Nullptr,
}

/// Operand of `sizeof` and `typeid`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeOrExpression {
    Type(TypeId),
    Expression(Box<Expression>),
}

impl TypeOrExpression {
    pub fn is_type_operand(&self) -> bool {
        matches!(self, TypeOrExpression::Type(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpression {
    /// Leading `::`
    pub global: bool,
    pub placement: Option<Vec<Expression>>,
    pub target: NewTarget,
    pub initializer: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NewTarget {
    /// `new int*[n]`
    Bare(NewTypeId),
    /// `new (int*)`
    Parenthesized(TypeId),
}

/// Parenthesised argument list or braced initializer list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Initializer {
    Parens(Vec<Expression>),
    Braced(Vec<Expression>),
}

impl Initializer {
    pub fn arguments(&self) -> &[Expression] {
        match self {
            Initializer::Parens(args) | Initializer::Braced(args) => args,
        }
    }
}

impl HasSpan for Expression {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

impl Expression {
    /// Strip any number of explicit parentheses
    pub fn without_parens(&self) -> &Expression {
        let mut current = self;
        while let ExpressionKind::Paren(inner) = &current.kind {
            current = inner;
        }
        current
    }

    pub fn is_binary(&self, expected: BinaryOp) -> bool {
        matches!(self.kind, ExpressionKind::Binary { op, .. } if op == expected)
    }
}
