//! Read-only traversal of expression trees
//!
//! Override the `visit_*` methods of interest and call the matching `walk_*`
//! function to keep descending.

use super::expressions::*;
use super::names::*;
use super::types::*;

pub trait Visitor {
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_type_id(&mut self, type_id: &TypeId) {
        walk_type_id(self, type_id);
    }

    fn visit_id_expression(&mut self, id: &IdExpression) {
        walk_id_expression(self, id);
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match &expr.kind {
        ExpressionKind::Literal(_) | ExpressionKind::This | ExpressionKind::Throw(None) => {}
        ExpressionKind::Id(id) => visitor.visit_id_expression(id),
        ExpressionKind::Paren(inner) | ExpressionKind::Throw(Some(inner)) => visitor.visit_expression(inner),
        ExpressionKind::Unary { operand, .. } | ExpressionKind::Delete { operand, .. } => {
            visitor.visit_expression(operand)
        }
        ExpressionKind::Binary { left, right, .. } => {
            visitor.visit_expression(left);
            visitor.visit_expression(right);
        }
        ExpressionKind::Conditional { condition, then_expr, else_expr } => {
            visitor.visit_expression(condition);
            visitor.visit_expression(then_expr);
            visitor.visit_expression(else_expr);
        }
        ExpressionKind::Cast { target_type, operand } | ExpressionKind::CppCast { target_type, operand, .. } => {
            visitor.visit_type_id(target_type);
            visitor.visit_expression(operand);
        }
        ExpressionKind::Sizeof(operand) | ExpressionKind::Typeid(operand) => match operand {
            TypeOrExpression::Type(type_id) => visitor.visit_type_id(type_id),
            TypeOrExpression::Expression(expr) => visitor.visit_expression(expr),
        },
        ExpressionKind::Alignof(type_id) => visitor.visit_type_id(type_id),
        ExpressionKind::New(new) => {
            for arg in new.placement.iter().flatten() {
                visitor.visit_expression(arg);
            }
            match &new.target {
                NewTarget::Bare(type_id) => walk_new_type_id(visitor, type_id),
                NewTarget::Parenthesized(type_id) => visitor.visit_type_id(type_id),
            }
            if let Some(initializer) = &new.initializer {
                for arg in initializer.arguments() {
                    visitor.visit_expression(arg);
                }
            }
        }
        ExpressionKind::Index { base, index } => {
            visitor.visit_expression(base);
            visitor.visit_expression(index);
        }
        ExpressionKind::Call { function, arguments } => {
            visitor.visit_expression(function);
            for arg in arguments {
                visitor.visit_expression(arg);
            }
        }
        ExpressionKind::Member { object, member, .. } => {
            visitor.visit_expression(object);
            visitor.visit_id_expression(member);
        }
        ExpressionKind::Construct { target, initializer } => {
            walk_type_specifier(visitor, target);
            for arg in initializer.arguments() {
                visitor.visit_expression(arg);
            }
        }
        ExpressionKind::InitializerList(items) => {
            for item in items {
                visitor.visit_expression(item);
            }
        }
    }
}

pub fn walk_type_specifier<V: Visitor + ?Sized>(visitor: &mut V, specifier: &TypeSpecifier) {
    match specifier {
        TypeSpecifier::Fundamental(_) | TypeSpecifier::Cv(_) => {}
        TypeSpecifier::Named(name) | TypeSpecifier::Elaborated { name, .. } => {
            visitor.visit_id_expression(name)
        }
        TypeSpecifier::Decltype(expr) => visitor.visit_expression(expr),
    }
}

fn walk_ptr_operator<V: Visitor + ?Sized>(visitor: &mut V, ptr: &PtrOperator) {
    if let PtrOperator::MemberPointer { class, .. } = ptr {
        visitor.visit_id_expression(class);
    }
}

fn walk_abstract_declarator<V: Visitor + ?Sized>(visitor: &mut V, declarator: &AbstractDeclarator) {
    for ptr in &declarator.ptr_operators {
        walk_ptr_operator(visitor, ptr);
    }
    let Some(direct) = &declarator.direct else {
        return;
    };
    if let Some(inner) = &direct.inner {
        walk_abstract_declarator(visitor, inner);
    }
    for suffix in &direct.suffixes {
        match suffix {
            DeclaratorSuffix::Array(bound) => {
                if let Some(bound) = bound {
                    visitor.visit_expression(bound);
                }
            }
            DeclaratorSuffix::Parameters { parameters, .. } => {
                for parameter in parameters {
                    visitor.visit_type_id(parameter);
                }
            }
        }
    }
}

pub fn walk_type_id<V: Visitor + ?Sized>(visitor: &mut V, type_id: &TypeId) {
    for specifier in &type_id.specifiers {
        walk_type_specifier(visitor, specifier);
    }
    if let Some(declarator) = &type_id.declarator {
        walk_abstract_declarator(visitor, declarator);
    }
}

pub fn walk_new_type_id<V: Visitor + ?Sized>(visitor: &mut V, type_id: &NewTypeId) {
    for specifier in &type_id.specifiers {
        walk_type_specifier(visitor, specifier);
    }
    let mut declarator = type_id.declarator.as_ref();
    while let Some(current) = declarator {
        match current {
            NewDeclarator::Pointer { operator, next } => {
                walk_ptr_operator(visitor, operator);
                declarator = next.as_deref();
            }
            NewDeclarator::Array(bounds) => {
                for bound in bounds {
                    visitor.visit_expression(bound);
                }
                declarator = None;
            }
        }
    }
}

fn walk_unqualified_id<V: Visitor + ?Sized>(visitor: &mut V, name: &UnqualifiedId) {
    match name {
        UnqualifiedId::Template(template) => {
            for argument in &template.arguments {
                match argument {
                    TemplateArgument::Type(type_id) => visitor.visit_type_id(type_id),
                    TemplateArgument::Expression(expr) => visitor.visit_expression(expr),
                }
            }
        }
        UnqualifiedId::ConversionFunction(type_id) => visitor.visit_type_id(type_id),
        UnqualifiedId::Identifier(_) | UnqualifiedId::OperatorFunction(_) | UnqualifiedId::Destructor(_) => {}
    }
}

pub fn walk_id_expression<V: Visitor + ?Sized>(visitor: &mut V, id: &IdExpression) {
    match id {
        IdExpression::Unqualified(name) => walk_unqualified_id(visitor, name),
        IdExpression::Nested { scope, name, .. } => {
            if let Some(scope) = scope {
                visitor.visit_id_expression(scope);
            }
            walk_unqualified_id(visitor, name);
        }
    }
}

/// Counts the nodes of each category in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCounter {
    pub expressions: usize,
    pub type_ids: usize,
    pub names: usize,
}

impl NodeCounter {
    pub fn count(expr: &Expression) -> Self {
        let mut counter = Self::default();
        counter.visit_expression(expr);
        counter
    }
}

impl Visitor for NodeCounter {
    fn visit_expression(&mut self, expr: &Expression) {
        self.expressions += 1;
        walk_expression(self, expr);
    }

    fn visit_type_id(&mut self, type_id: &TypeId) {
        self.type_ids += 1;
        walk_type_id(self, type_id);
    }

    fn visit_id_expression(&mut self, id: &IdExpression) {
        self.names += 1;
        walk_id_expression(self, id);
    }
}
