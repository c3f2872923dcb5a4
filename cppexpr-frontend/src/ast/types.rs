//! Type AST nodes
//!
//! The type-ids that casts, `sizeof`, `alignof`, `typeid`, `new` and
//! template arguments carry. These are purely syntactic: nothing here
//! knows what a name refers to.

use super::expressions::Expression;
use super::names::IdExpression;
use cppexpr_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fundamental type keywords; several may combine (`unsigned long long`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundamentalType {
    Void, Bool, Auto,
    Char, Char8, Char16, Char32, WChar,
    Short, Int, Long, Signed, Unsigned,
    Float, Double,
}

impl fmt::Display for FundamentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            FundamentalType::Void => "void",
            FundamentalType::Bool => "bool",
            FundamentalType::Auto => "auto",
            FundamentalType::Char => "char",
            FundamentalType::Char8 => "char8_t",
            FundamentalType::Char16 => "char16_t",
            FundamentalType::Char32 => "char32_t",
            FundamentalType::WChar => "wchar_t",
            FundamentalType::Short => "short",
            FundamentalType::Int => "int",
            FundamentalType::Long => "long",
            FundamentalType::Signed => "signed",
            FundamentalType::Unsigned => "unsigned",
            FundamentalType::Float => "float",
            FundamentalType::Double => "double",
        };
        write!(f, "{}", keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvQualifier {
    Const,
    Volatile,
}

impl fmt::Display for CvQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CvQualifier::Const => write!(f, "const"),
            CvQualifier::Volatile => write!(f, "volatile"),
        }
    }
}

/// Keyword introducing an elaborated type specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKey {
    Class,
    Struct,
    Union,
    Enum,
    Typename,
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            ClassKey::Class => "class",
            ClassKey::Struct => "struct",
            ClassKey::Union => "union",
            ClassKey::Enum => "enum",
            ClassKey::Typename => "typename",
        };
        write!(f, "{}", keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSpecifier {
    Fundamental(FundamentalType),
    Cv(CvQualifier),
    Named(IdExpression),
    Elaborated { key: ClassKey, name: IdExpression },
    Decltype(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PtrOperator {
    Pointer(Vec<CvQualifier>),
    LvalueReference,
    RvalueReference,
    /// `Class::*`
    MemberPointer { class: IdExpression, cv: Vec<CvQualifier> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclaratorSuffix {
    Array(Option<Box<Expression>>),
    Parameters {
        parameters: Vec<TypeId>,
        variadic: bool,
        cv: Vec<CvQualifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectAbstractDeclarator {
    /// Parenthesised inner declarator, as in `int (*)[4]`
    pub inner: Option<Box<AbstractDeclarator>>,
    pub suffixes: Vec<DeclaratorSuffix>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractDeclarator {
    pub ptr_operators: Vec<PtrOperator>,
    pub direct: Option<DirectAbstractDeclarator>,
}

/// A type-specifier sequence plus an optional abstract declarator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeId {
    pub specifiers: Vec<TypeSpecifier>,
    pub declarator: Option<AbstractDeclarator>,
    pub span: SourceSpan,
}

impl TypeId {
    /// A lone name that might just as well be a value: `T`, `a[i]`, `f(x)`.
    /// Keywords, cv-qualifiers and pointer operators make it certainly a type.
    pub fn could_be_expression(&self) -> bool {
        let single_name = matches!(self.specifiers.as_slice(), [TypeSpecifier::Named(_)]);
        let no_ptr = self
            .declarator
            .as_ref()
            .map_or(true, |d| d.ptr_operators.is_empty() && d.direct.as_ref().map_or(true, |dd| dd.inner.is_none()));
        single_name && no_ptr
    }
}

/// The pointer and array part of a `new` type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NewDeclarator {
    Pointer {
        operator: PtrOperator,
        next: Option<Box<NewDeclarator>>,
    },
    /// One or more bounds; only the first may be a non-constant expression
    Array(Vec<Expression>),
}

impl NewDeclarator {
    /// Array bounds at the end of the declarator chain
    pub fn array_bounds(&self) -> &[Expression] {
        match self {
            NewDeclarator::Pointer { next: Some(next), .. } => next.array_bounds(),
            NewDeclarator::Pointer { next: None, .. } => &[],
            NewDeclarator::Array(bounds) => bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTypeId {
    pub specifiers: Vec<TypeSpecifier>,
    pub declarator: Option<NewDeclarator>,
    pub span: SourceSpan,
}
