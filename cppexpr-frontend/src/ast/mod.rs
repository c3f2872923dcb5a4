//! Abstract Syntax Tree definitions for C++ expressions
//!
//! This module defines the AST nodes that represent C++ expressions, the
//! names and type-ids they mention, and the ways to print, dump and walk
//! them. The AST is built by the parser and handed to the caller whole.

pub mod display;
pub mod dump;
pub mod expressions;
pub mod names;
pub mod ops;
pub mod types;
pub mod visitor;

// Re-export commonly used types at module level
pub use expressions::{
    Expression, ExpressionKind, Initializer, Literal, LiteralKind, NewExpression, NewTarget,
    TypeOrExpression,
};
pub use names::{IdExpression, TemplateArgument, TemplateId, UnqualifiedId};
pub use ops::{BinaryOp, CastKind, OverloadableOperator, UnaryOp};
pub use types::{
    AbstractDeclarator, ClassKey, CvQualifier, DeclaratorSuffix, DirectAbstractDeclarator,
    FundamentalType, NewDeclarator, NewTypeId, PtrOperator, TypeId, TypeSpecifier,
};
pub use visitor::{NodeCounter, Visitor};

use cppexpr_common::CompilerError;

/// Unique identifier for AST nodes (useful for debugging and analysis)
pub type NodeId = u32;

/// Node ID generator for AST nodes
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next_id: NodeId,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    pub fn next(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> NodeId {
        self.next_id
    }
}

/// Serialize a tree to pretty-printed JSON
pub fn to_json(expr: &Expression) -> Result<String, CompilerError> {
    serde_json::to_string_pretty(expr).map_err(|e| CompilerError::InternalError {
        message: format!("failed to serialize expression: {e}"),
    })
}
