//! Token definitions for the C++ expression lexer
//!
//! This module defines token types and the Token struct.

use cppexpr_common::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// C++ token types
///
/// `>` is never merged with a following `>`: `>>` and `>>=` reach the
/// parser as adjacent tokens so template argument lists can close one
/// bracket at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals, with their source spelling
    IntLiteral { value: u64, text: String },
    FloatLiteral { value: f64, text: String },
    CharLiteral { value: u32, text: String },
    StringLiteral { value: String, text: String },

    Identifier(String),

    // Fundamental types and specifiers
    Auto, Bool, Char, Char8T, Char16T, Char32T, WCharT,
    Short, Int, Long, Signed, Unsigned, Float, Double, Void,
    Const, Volatile,
    Class, Struct, Union, Enum, Typename, Decltype,

    // Expression keywords
    New, Delete, This, Throw, Sizeof, Alignof, Typeid, Operator, Template,
    True, False, Nullptr,
    StaticCast, DynamicCast, ReinterpretCast, ConstCast,

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Pipe,           // |
    Caret,          // ^
    Tilde,          // ~
    Bang,           // !
    Equal,          // =
    Less,           // <
    Greater,        // >
    Question,       // ?
    Colon,          // :

    // Compound operators
    PlusPlus,       // ++
    MinusMinus,     // --
    LeftShift,      // <<
    LessEqual,      // <=
    GreaterEqual,   // >=
    EqualEqual,     // ==
    BangEqual,      // !=
    AmpersandAmpersand, // &&
    PipePipe,       // ||

    // Assignment operators
    PlusEqual,      // +=
    MinusEqual,     // -=
    StarEqual,      // *=
    SlashEqual,     // /=
    PercentEqual,   // %=
    AmpersandEqual, // &=
    PipeEqual,      // |=
    CaretEqual,     // ^=
    LeftShiftEqual, // <<=

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Semicolon,      // ;
    Comma,          // ,
    Dot,            // .
    DotStar,        // .*
    Arrow,          // ->
    ArrowStar,      // ->*
    ColonColon,     // ::
    Ellipsis,       // ...

    // Special
    Newline,
    EndOfFile,

    // Comments (stripped before parsing)
    LineComment(String),
    BlockComment(String),
}

impl TokenType {
    /// Keyword table shared by the lexer and the printer
    pub fn keyword(word: &str) -> Option<TokenType> {
        let token = match word {
            "auto" => TokenType::Auto,
            "bool" => TokenType::Bool,
            "char" => TokenType::Char,
            "char8_t" => TokenType::Char8T,
            "char16_t" => TokenType::Char16T,
            "char32_t" => TokenType::Char32T,
            "wchar_t" => TokenType::WCharT,
            "short" => TokenType::Short,
            "int" => TokenType::Int,
            "long" => TokenType::Long,
            "signed" => TokenType::Signed,
            "unsigned" => TokenType::Unsigned,
            "float" => TokenType::Float,
            "double" => TokenType::Double,
            "void" => TokenType::Void,
            "const" => TokenType::Const,
            "volatile" => TokenType::Volatile,
            "class" => TokenType::Class,
            "struct" => TokenType::Struct,
            "union" => TokenType::Union,
            "enum" => TokenType::Enum,
            "typename" => TokenType::Typename,
            "decltype" => TokenType::Decltype,
            "new" => TokenType::New,
            "delete" => TokenType::Delete,
            "this" => TokenType::This,
            "throw" => TokenType::Throw,
            "sizeof" => TokenType::Sizeof,
            "alignof" => TokenType::Alignof,
            "typeid" => TokenType::Typeid,
            "operator" => TokenType::Operator,
            "template" => TokenType::Template,
            "true" => TokenType::True,
            "false" => TokenType::False,
            "nullptr" => TokenType::Nullptr,
            "static_cast" => TokenType::StaticCast,
            "dynamic_cast" => TokenType::DynamicCast,
            "reinterpret_cast" => TokenType::ReinterpretCast,
            "const_cast" => TokenType::ConstCast,
            _ => return None,
        };
        Some(token)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenType::IntLiteral { .. }
                | TokenType::FloatLiteral { .. }
                | TokenType::CharLiteral { .. }
                | TokenType::StringLiteral { .. }
                | TokenType::True
                | TokenType::False
                | TokenType::Nullptr
        )
    }

    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenType::LineComment(_) | TokenType::BlockComment(_) | TokenType::Newline
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenType::IntLiteral { text, .. }
            | TokenType::FloatLiteral { text, .. }
            | TokenType::CharLiteral { text, .. }
            | TokenType::StringLiteral { text, .. } => return write!(f, "{text}"),
            TokenType::Identifier(s) => return write!(f, "{s}"),
            TokenType::LineComment(s) => return write!(f, "//{s}"),
            TokenType::BlockComment(s) => return write!(f, "/*{s}*/"),

            TokenType::Auto => "auto",
            TokenType::Bool => "bool",
            TokenType::Char => "char",
            TokenType::Char8T => "char8_t",
            TokenType::Char16T => "char16_t",
            TokenType::Char32T => "char32_t",
            TokenType::WCharT => "wchar_t",
            TokenType::Short => "short",
            TokenType::Int => "int",
            TokenType::Long => "long",
            TokenType::Signed => "signed",
            TokenType::Unsigned => "unsigned",
            TokenType::Float => "float",
            TokenType::Double => "double",
            TokenType::Void => "void",
            TokenType::Const => "const",
            TokenType::Volatile => "volatile",
            TokenType::Class => "class",
            TokenType::Struct => "struct",
            TokenType::Union => "union",
            TokenType::Enum => "enum",
            TokenType::Typename => "typename",
            TokenType::Decltype => "decltype",
            TokenType::New => "new",
            TokenType::Delete => "delete",
            TokenType::This => "this",
            TokenType::Throw => "throw",
            TokenType::Sizeof => "sizeof",
            TokenType::Alignof => "alignof",
            TokenType::Typeid => "typeid",
            TokenType::Operator => "operator",
            TokenType::Template => "template",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::Nullptr => "nullptr",
            TokenType::StaticCast => "static_cast",
            TokenType::DynamicCast => "dynamic_cast",
            TokenType::ReinterpretCast => "reinterpret_cast",
            TokenType::ConstCast => "const_cast",

            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Percent => "%",
            TokenType::Ampersand => "&",
            TokenType::Pipe => "|",
            TokenType::Caret => "^",
            TokenType::Tilde => "~",
            TokenType::Bang => "!",
            TokenType::Equal => "=",
            TokenType::Less => "<",
            TokenType::Greater => ">",
            TokenType::Question => "?",
            TokenType::Colon => ":",

            TokenType::PlusPlus => "++",
            TokenType::MinusMinus => "--",
            TokenType::LeftShift => "<<",
            TokenType::LessEqual => "<=",
            TokenType::GreaterEqual => ">=",
            TokenType::EqualEqual => "==",
            TokenType::BangEqual => "!=",
            TokenType::AmpersandAmpersand => "&&",
            TokenType::PipePipe => "||",

            TokenType::PlusEqual => "+=",
            TokenType::MinusEqual => "-=",
            TokenType::StarEqual => "*=",
            TokenType::SlashEqual => "/=",
            TokenType::PercentEqual => "%=",
            TokenType::AmpersandEqual => "&=",
            TokenType::PipeEqual => "|=",
            TokenType::CaretEqual => "^=",
            TokenType::LeftShiftEqual => "<<=",

            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::LeftBracket => "[",
            TokenType::RightBracket => "]",
            TokenType::Semicolon => ";",
            TokenType::Comma => ",",
            TokenType::Dot => ".",
            TokenType::DotStar => ".*",
            TokenType::Arrow => "->",
            TokenType::ArrowStar => "->*",
            TokenType::ColonColon => "::",
            TokenType::Ellipsis => "...",

            TokenType::Newline => "\\n",
            TokenType::EndOfFile => "end of input",
        };
        write!(f, "{text}")
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self {
            token_type: TokenType::EndOfFile,
            span: SourceSpan::new(location.clone(), location),
        }
    }

    /// True when `next` starts exactly where this token ends
    pub fn touches(&self, next: &Token) -> bool {
        self.span.end.offset == next.span.start.offset
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at {}", self.token_type, self.span.start)
    }
}
