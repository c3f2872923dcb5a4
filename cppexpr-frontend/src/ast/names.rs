//! Name AST nodes
//!
//! Identifiers, template-ids, operator and conversion function names,
//! destructor names, and their `::` qualified forms.

use super::expressions::Expression;
use super::ops::OverloadableOperator;
use super::types::TypeId;
use serde::{Deserialize, Serialize};

/// A name that is not qualified by a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnqualifiedId {
    Identifier(String),
    Template(TemplateId),
    /// `operator+=`, `operator new[]`, `operator()`
    OperatorFunction(OverloadableOperator),
    /// `operator int*`
    ConversionFunction(Box<TypeId>),
    /// `~Name`
    Destructor(String),
}

/// `name < arguments >`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateId {
    pub name: String,
    pub arguments: Vec<TemplateArgument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateArgument {
    Type(TypeId),
    Expression(Box<Expression>),
}

/// A possibly qualified name
///
/// `a::b::c` nests to the left: the scope of `c` is `a::b`, whose scope is
/// `a`. A `None` scope is the global namespace (`::c`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IdExpression {
    Unqualified(UnqualifiedId),
    Nested {
        scope: Option<Box<IdExpression>>,
        /// `a::template b<int>`
        template_keyword: bool,
        name: UnqualifiedId,
    },
}

impl IdExpression {
    pub fn identifier(name: &str) -> Self {
        IdExpression::Unqualified(UnqualifiedId::Identifier(name.to_string()))
    }

    /// The rightmost component
    pub fn name(&self) -> &UnqualifiedId {
        match self {
            IdExpression::Unqualified(name) => name,
            IdExpression::Nested { name, .. } => name,
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, IdExpression::Nested { .. })
    }

    /// The plain identifier, when this is an unqualified non-template name
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            IdExpression::Unqualified(UnqualifiedId::Identifier(name)) => Some(name),
            _ => None,
        }
    }

    /// Scope components from the outermost inwards, ending with this name
    pub fn components(&self) -> Vec<&UnqualifiedId> {
        let mut components = Vec::new();
        let mut current = Some(self);
        while let Some(id) = current {
            match id {
                IdExpression::Unqualified(name) => {
                    components.push(name);
                    current = None;
                }
                IdExpression::Nested { scope, name, .. } => {
                    components.push(name);
                    current = scope.as_deref();
                }
            }
        }
        components.reverse();
        components
    }

    /// True when the chain starts at the global namespace
    pub fn is_global(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                IdExpression::Unqualified(_) => return false,
                IdExpression::Nested { scope: None, .. } => return true,
                IdExpression::Nested { scope: Some(scope), .. } => current = scope,
            }
        }
    }
}
