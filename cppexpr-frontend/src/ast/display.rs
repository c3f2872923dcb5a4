//! C++ source printing for AST nodes
//!
//! Printing reproduces the token sequence the tree was parsed from, modulo
//! whitespace, so parsing the output again yields the same shape.

use super::expressions::*;
use super::names::*;
use super::types::*;
use std::fmt;

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_cv(f: &mut fmt::Formatter<'_>, cv: &[CvQualifier]) -> fmt::Result {
    for qualifier in cv {
        write!(f, " {}", qualifier)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionKind::Literal(literal) => write!(f, "{}", literal.text),
            ExpressionKind::Id(id) => write!(f, "{}", id),
            ExpressionKind::This => write!(f, "this"),
            ExpressionKind::Paren(inner) => write!(f, "({})", inner),
            ExpressionKind::Unary { op, operand } if op.is_postfix() => {
                write!(f, "{}{}", operand, op)
            }
            ExpressionKind::Unary { op, operand } => {
                let operand = operand.to_string();
                let op = op.to_string();
                // `- -a` and `& &a` must not fuse into `--a` and `&&a`
                if op.chars().last() == operand.chars().next() {
                    write!(f, "{} {}", op, operand)
                } else {
                    write!(f, "{}{}", op, operand)
                }
            }
            ExpressionKind::Binary { op: super::BinaryOp::Comma, left, right } => {
                write!(f, "{}, {}", left, right)
            }
            ExpressionKind::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
            ExpressionKind::Conditional { condition, then_expr, else_expr } => {
                write!(f, "{} ? {} : {}", condition, then_expr, else_expr)
            }
            ExpressionKind::Cast { target_type, operand } => write!(f, "({}){}", target_type, operand),
            ExpressionKind::CppCast { kind, target_type, operand } => {
                write!(f, "{}<{}>({})", kind, target_type, operand)
            }
            ExpressionKind::Sizeof(TypeOrExpression::Type(type_id)) => write!(f, "sizeof({})", type_id),
            ExpressionKind::Sizeof(TypeOrExpression::Expression(operand)) => write!(f, "sizeof {}", operand),
            ExpressionKind::Alignof(type_id) => write!(f, "alignof({})", type_id),
            ExpressionKind::Typeid(operand) => write!(f, "typeid({})", operand),
            ExpressionKind::New(new) => write!(f, "{}", new),
            ExpressionKind::Delete { global, array, operand } => {
                if *global {
                    write!(f, "::")?;
                }
                write!(f, "delete")?;
                if *array {
                    write!(f, "[]")?;
                }
                write!(f, " {}", operand)
            }
            ExpressionKind::Index { base, index } => write!(f, "{}[{}]", base, index),
            ExpressionKind::Call { function, arguments } => {
                write!(f, "{}(", function)?;
                write_list(f, arguments)?;
                write!(f, ")")
            }
            ExpressionKind::Member { object, member, is_pointer } => {
                let access = if *is_pointer { "->" } else { "." };
                write!(f, "{}{}{}", object, access, member)
            }
            ExpressionKind::Throw(None) => write!(f, "throw"),
            ExpressionKind::Throw(Some(operand)) => write!(f, "throw {}", operand),
            ExpressionKind::Construct { target, initializer } => write!(f, "{}{}", target, initializer),
            ExpressionKind::InitializerList(items) => {
                write!(f, "{{")?;
                write_list(f, items)?;
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for TypeOrExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeOrExpression::Type(type_id) => write!(f, "{}", type_id),
            TypeOrExpression::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initializer::Parens(args) => {
                write!(f, "(")?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Initializer::Braced(args) => {
                write!(f, "{{")?;
                write_list(f, args)?;
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for NewExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "::")?;
        }
        write!(f, "new ")?;
        if let Some(placement) = &self.placement {
            write!(f, "(")?;
            write_list(f, placement)?;
            write!(f, ") ")?;
        }
        match &self.target {
            NewTarget::Bare(type_id) => write!(f, "{}", type_id)?,
            NewTarget::Parenthesized(type_id) => write!(f, "({})", type_id)?,
        }
        if let Some(initializer) = &self.initializer {
            write!(f, "{}", initializer)?;
        }
        Ok(())
    }
}

impl fmt::Display for IdExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdExpression::Unqualified(name) => write!(f, "{}", name),
            IdExpression::Nested { scope, template_keyword, name } => {
                if let Some(scope) = scope {
                    write!(f, "{}", scope)?;
                }
                write!(f, "::")?;
                if *template_keyword {
                    write!(f, "template ")?;
                }
                write!(f, "{}", name)
            }
        }
    }
}

impl fmt::Display for UnqualifiedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnqualifiedId::Identifier(name) => write!(f, "{}", name),
            UnqualifiedId::Template(template) => write!(f, "{}", template),
            UnqualifiedId::OperatorFunction(op) => match op {
                super::OverloadableOperator::New
                | super::OverloadableOperator::Delete
                | super::OverloadableOperator::NewArray
                | super::OverloadableOperator::DeleteArray => write!(f, "operator {}", op),
                _ => write!(f, "operator{}", op),
            },
            UnqualifiedId::ConversionFunction(type_id) => write!(f, "operator {}", type_id),
            UnqualifiedId::Destructor(name) => write!(f, "~{}", name),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.name)?;
        write_list(f, &self.arguments)?;
        write!(f, ">")
    }
}

impl fmt::Display for TemplateArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArgument::Type(type_id) => write!(f, "{}", type_id),
            TemplateArgument::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpecifier::Fundamental(fundamental) => write!(f, "{}", fundamental),
            TypeSpecifier::Cv(cv) => write!(f, "{}", cv),
            TypeSpecifier::Named(name) => write!(f, "{}", name),
            TypeSpecifier::Elaborated { key, name } => write!(f, "{} {}", key, name),
            TypeSpecifier::Decltype(expr) => write!(f, "decltype({})", expr),
        }
    }
}

fn write_specifiers(f: &mut fmt::Formatter<'_>, specifiers: &[TypeSpecifier]) -> fmt::Result {
    for (i, specifier) in specifiers.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", specifier)?;
    }
    Ok(())
}

impl fmt::Display for PtrOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PtrOperator::Pointer(cv) => {
                write!(f, "*")?;
                write_cv(f, cv)
            }
            PtrOperator::LvalueReference => write!(f, "&"),
            PtrOperator::RvalueReference => write!(f, "&&"),
            PtrOperator::MemberPointer { class, cv } => {
                write!(f, " {}::*", class)?;
                write_cv(f, cv)
            }
        }
    }
}

impl fmt::Display for DeclaratorSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaratorSuffix::Array(None) => write!(f, "[]"),
            DeclaratorSuffix::Array(Some(bound)) => write!(f, "[{}]", bound),
            DeclaratorSuffix::Parameters { parameters, variadic, cv } => {
                write!(f, "(")?;
                write_list(f, parameters)?;
                if *variadic {
                    if !parameters.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, ")")?;
                write_cv(f, cv)
            }
        }
    }
}

impl fmt::Display for AbstractDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ptr in &self.ptr_operators {
            write!(f, "{}", ptr)?;
        }
        if let Some(direct) = &self.direct {
            if let Some(inner) = &direct.inner {
                write!(f, " ({})", inner)?;
            }
            for suffix in &direct.suffixes {
                write!(f, "{}", suffix)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_specifiers(f, &self.specifiers)?;
        if let Some(declarator) = &self.declarator {
            write!(f, "{}", declarator)?;
        }
        Ok(())
    }
}

impl fmt::Display for NewDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewDeclarator::Pointer { operator, next } => {
                write!(f, "{}", operator)?;
                if let Some(next) = next {
                    write!(f, "{}", next)?;
                }
                Ok(())
            }
            NewDeclarator::Array(bounds) => {
                for bound in bounds {
                    write!(f, "[{}]", bound)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for NewTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_specifiers(f, &self.specifiers)?;
        if let Some(declarator) = &self.declarator {
            write!(f, "{}", declarator)?;
        }
        Ok(())
    }
}
