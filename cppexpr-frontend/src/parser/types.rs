//! Type parsing for C++ expressions
//!
//! This module handles type-specifier sequences, abstract declarators and
//! the three type-id forms: plain type-ids, new-type-ids and
//! conversion-type-ids.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{NameContext, ParseError, ParseMode, Parser};

pub(crate) fn fundamental_type(token: &TokenType) -> Option<FundamentalType> {
    let fundamental = match token {
        TokenType::Void => FundamentalType::Void,
        TokenType::Bool => FundamentalType::Bool,
        TokenType::Auto => FundamentalType::Auto,
        TokenType::Char => FundamentalType::Char,
        TokenType::Char8T => FundamentalType::Char8,
        TokenType::Char16T => FundamentalType::Char16,
        TokenType::Char32T => FundamentalType::Char32,
        TokenType::WCharT => FundamentalType::WChar,
        TokenType::Short => FundamentalType::Short,
        TokenType::Int => FundamentalType::Int,
        TokenType::Long => FundamentalType::Long,
        TokenType::Signed => FundamentalType::Signed,
        TokenType::Unsigned => FundamentalType::Unsigned,
        TokenType::Float => FundamentalType::Float,
        TokenType::Double => FundamentalType::Double,
        _ => return None,
    };
    Some(fundamental)
}

fn class_key(token: &TokenType) -> Option<ClassKey> {
    match token {
        TokenType::Class => Some(ClassKey::Class),
        TokenType::Struct => Some(ClassKey::Struct),
        TokenType::Union => Some(ClassKey::Union),
        TokenType::Enum => Some(ClassKey::Enum),
        TokenType::Typename => Some(ClassKey::Typename),
        _ => None,
    }
}

impl Parser {
    /// Whether the current token can begin a type-specifier-seq
    pub(crate) fn at_type_specifier(&self) -> bool {
        let token = self.peek_type();
        fundamental_type(token).is_some()
            || class_key(token).is_some()
            || matches!(
                token,
                TokenType::Const
                    | TokenType::Volatile
                    | TokenType::Decltype
                    | TokenType::Identifier(_)
                    | TokenType::ColonColon
            )
    }

    pub(crate) fn parse_cv_qualifiers(&mut self) -> Vec<CvQualifier> {
        let mut cv = Vec::new();
        loop {
            match self.peek_type() {
                TokenType::Const => cv.push(CvQualifier::Const),
                TokenType::Volatile => cv.push(CvQualifier::Volatile),
                _ => return cv,
            }
            self.advance();
        }
    }

    /// Fundamental keywords combine freely; a named, elaborated or
    /// `decltype` specifier stands alone. cv-qualifiers go anywhere.
    pub fn parse_type_specifier_seq(&mut self) -> Result<Vec<TypeSpecifier>, ParseError> {
        let mut specifiers = Vec::new();
        let mut seen_type = false;

        loop {
            let token = self.peek_type().clone();
            if let Some(fundamental) = fundamental_type(&token) {
                if specifiers.iter().any(|s| !matches!(s, TypeSpecifier::Cv(_) | TypeSpecifier::Fundamental(_))) {
                    break;
                }
                self.advance();
                specifiers.push(TypeSpecifier::Fundamental(fundamental));
                seen_type = true;
                continue;
            }

            if let Some(key) = class_key(&token) {
                if seen_type {
                    break;
                }
                self.advance();
                let name = self.require(&format!("name after `{key}`"), |p| {
                    p.parse_id_expression(NameContext::Type)
                })?;
                specifiers.push(TypeSpecifier::Elaborated { key, name });
                seen_type = true;
                continue;
            }

            match token {
                TokenType::Const | TokenType::Volatile => {
                    specifiers.extend(self.parse_cv_qualifiers().into_iter().map(TypeSpecifier::Cv));
                }
                _ if seen_type => break,
                TokenType::Decltype => {
                    specifiers.push(self.parse_decltype()?);
                    seen_type = true;
                }
                TokenType::Identifier(_) | TokenType::ColonColon => {
                    match self.attempt(|p| p.parse_type_name())? {
                        Some(name) => specifiers.push(TypeSpecifier::Named(name)),
                        None => break,
                    }
                    seen_type = true;
                }
                _ => break,
            }
        }

        if !seen_type {
            return Err(self.unexpected("a type"));
        }
        Ok(specifiers)
    }

    /// A name usable as a type: no operator, conversion or destructor names
    fn parse_type_name(&mut self) -> Result<IdExpression, ParseError> {
        let name = self.parse_id_expression(NameContext::Type)?;
        match name.name() {
            UnqualifiedId::Identifier(_) | UnqualifiedId::Template(_) => Ok(name),
            _ => Err(self.unexpected("a type name")),
        }
    }

    pub(crate) fn parse_decltype(&mut self) -> Result<TypeSpecifier, ParseError> {
        self.expect(TokenType::Decltype, "type specifier")?;
        self.require_token(TokenType::LeftParen, "`decltype`")?;
        let expr = self.with_mode(ParseMode::Expression, |p| {
            p.require("expression in `decltype`", |p| p.parse_expression())
        })?;
        self.require_token(TokenType::RightParen, "`decltype`")?;
        Ok(TypeSpecifier::Decltype(Box::new(expr)))
    }

    pub fn parse_ptr_operator(&mut self) -> Result<PtrOperator, ParseError> {
        match self.peek_type() {
            TokenType::Star => {
                self.advance();
                Ok(PtrOperator::Pointer(self.parse_cv_qualifiers()))
            }
            TokenType::Ampersand => {
                self.advance();
                Ok(PtrOperator::LvalueReference)
            }
            TokenType::AmpersandAmpersand => {
                self.advance();
                Ok(PtrOperator::RvalueReference)
            }
            TokenType::Identifier(_) | TokenType::ColonColon => {
                let class = self.parse_type_name()?;
                self.expect(TokenType::ColonColon, "pointer to member")?;
                self.expect(TokenType::Star, "pointer to member")?;
                let cv = self.parse_cv_qualifiers();
                Ok(PtrOperator::MemberPointer { class, cv })
            }
            _ => Err(self.unexpected("`*`, `&` or `&&`")),
        }
    }

    fn parse_ptr_operators(&mut self) -> Result<Vec<PtrOperator>, ParseError> {
        let mut operators = Vec::new();
        while let Some(operator) = self.attempt(|p| p.parse_ptr_operator())? {
            operators.push(operator);
        }
        Ok(operators)
    }

    pub fn parse_abstract_declarator(&mut self) -> Result<Option<AbstractDeclarator>, ParseError> {
        let ptr_operators = self.parse_ptr_operators()?;
        let direct = self.parse_direct_abstract_declarator()?;

        if ptr_operators.is_empty() && direct.is_none() {
            return Ok(None);
        }
        Ok(Some(AbstractDeclarator { ptr_operators, direct }))
    }

    fn parse_direct_abstract_declarator(&mut self) -> Result<Option<DirectAbstractDeclarator>, ParseError> {
        let mut inner = None;
        let opens_inner = self.check(&TokenType::LeftParen)
            && matches!(
                self.peek_nth(1).token_type,
                TokenType::Star | TokenType::Ampersand | TokenType::AmpersandAmpersand
            );
        if opens_inner {
            inner = self
                .attempt(|p| {
                    p.advance();
                    let declarator = p.descend(|p| p.parse_abstract_declarator())?;
                    p.expect(TokenType::RightParen, "declarator")?;
                    Ok(declarator.map(Box::new))
                })?
                .flatten();
        }

        let mut suffixes = Vec::new();
        loop {
            if self.check(&TokenType::LeftBracket) {
                match self.attempt(|p| p.parse_array_suffix())? {
                    Some(suffix) => suffixes.push(suffix),
                    None => break,
                }
            } else if self.check(&TokenType::LeftParen) {
                match self.attempt(|p| p.parse_parameters_suffix())? {
                    Some(suffix) => suffixes.push(suffix),
                    None => break,
                }
            } else {
                break;
            }
        }

        if inner.is_none() && suffixes.is_empty() {
            return Ok(None);
        }
        Ok(Some(DirectAbstractDeclarator { inner, suffixes }))
    }

    fn parse_array_suffix(&mut self) -> Result<DeclaratorSuffix, ParseError> {
        self.expect(TokenType::LeftBracket, "array declarator")?;
        if self.match_token(&TokenType::RightBracket) {
            return Ok(DeclaratorSuffix::Array(None));
        }
        let bound = self.with_mode(ParseMode::Expression, |p| p.parse_conditional_expression())?;
        self.expect(TokenType::RightBracket, "array declarator")?;
        Ok(DeclaratorSuffix::Array(Some(Box::new(bound))))
    }

    /// `(int, char*, ...) const`
    fn parse_parameters_suffix(&mut self) -> Result<DeclaratorSuffix, ParseError> {
        self.expect(TokenType::LeftParen, "parameter list")?;

        let mut parameters = Vec::new();
        let mut variadic = false;
        if !self.check(&TokenType::RightParen) {
            loop {
                if self.match_token(&TokenType::Ellipsis) {
                    variadic = true;
                    break;
                }
                parameters.push(self.parse_type_id()?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "parameter list")?;

        let cv = self.parse_cv_qualifiers();
        Ok(DeclaratorSuffix::Parameters { parameters, variadic, cv })
    }

    /// Parse a type-id: specifiers plus an optional abstract declarator
    pub fn parse_type_id(&mut self) -> Result<TypeId, ParseError> {
        self.descend(|p| {
            let start = p.peek().span.clone();
            let specifiers = p.parse_type_specifier_seq()?;
            let declarator = p.parse_abstract_declarator()?;
            Ok(TypeId {
                specifiers,
                declarator,
                span: p.span_from(&start),
            })
        })
    }

    /// The type of a `new` expression. Parentheses and references are not
    /// part of it; every `[` that follows is an array bound.
    pub fn parse_new_type_id(&mut self) -> Result<NewTypeId, ParseError> {
        let start = self.peek().span.clone();
        let specifiers = self.parse_type_specifier_seq()?;
        let declarator = self.parse_new_declarator()?;
        Ok(NewTypeId {
            specifiers,
            declarator,
            span: self.span_from(&start),
        })
    }

    fn parse_new_declarator(&mut self) -> Result<Option<NewDeclarator>, ParseError> {
        let operator = match self.peek_type() {
            TokenType::Star | TokenType::Identifier(_) | TokenType::ColonColon => {
                self.attempt(|p| p.parse_ptr_operator())?
            }
            _ => None,
        };
        if let Some(operator) = operator {
            let next = self.descend(|p| p.parse_new_declarator())?.map(Box::new);
            return Ok(Some(NewDeclarator::Pointer { operator, next }));
        }

        if !self.match_token(&TokenType::LeftBracket) {
            return Ok(None);
        }
        let first = self.with_mode(ParseMode::Expression, |p| {
            p.require("array size in `new`", |p| p.parse_expression())
        })?;
        self.require_token(TokenType::RightBracket, "array size in `new`")?;

        let mut bounds = vec![first];
        while self.match_token(&TokenType::LeftBracket) {
            let bound = self.with_mode(ParseMode::Expression, |p| {
                p.require("array bound in `new`", |p| p.parse_conditional_expression())
            })?;
            self.require_token(TokenType::RightBracket, "array bound in `new`")?;
            bounds.push(bound);
        }
        Ok(Some(NewDeclarator::Array(bounds)))
    }

    /// The type named by a conversion function: `operator const char*`
    pub fn parse_conversion_type_id(&mut self) -> Result<TypeId, ParseError> {
        let start = self.peek().span.clone();
        let specifiers = self.parse_type_specifier_seq()?;
        let ptr_operators = self.parse_ptr_operators()?;
        let declarator = if ptr_operators.is_empty() {
            None
        } else {
            Some(AbstractDeclarator { ptr_operators, direct: None })
        };
        Ok(TypeId {
            specifiers,
            declarator,
            span: self.span_from(&start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parser_for(input: &str) -> Parser {
        let mut lexer = Lexer::new(input);
        Parser::new(lexer.tokenize().unwrap())
    }

    fn type_id(input: &str) -> TypeId {
        let mut parser = parser_for(input);
        let type_id = parser.parse_type_id().unwrap();
        assert!(parser.check(&TokenType::EndOfFile), "leftover input after `{input}`");
        type_id
    }

    #[test]
    fn test_fundamental_keywords_combine() {
        let parsed = type_id("const unsigned long long");
        assert_eq!(
            parsed.specifiers,
            vec![
                TypeSpecifier::Cv(CvQualifier::Const),
                TypeSpecifier::Fundamental(FundamentalType::Unsigned),
                TypeSpecifier::Fundamental(FundamentalType::Long),
                TypeSpecifier::Fundamental(FundamentalType::Long),
            ]
        );
        assert!(parsed.declarator.is_none());
    }

    #[test]
    fn test_named_type_stands_alone() {
        let mut parser = parser_for("T U");
        let parsed = parser.parse_type_id().unwrap();
        assert_eq!(parsed.specifiers.len(), 1);
        assert!(matches!(parser.peek_type(), TokenType::Identifier(name) if name == "U"));
    }

    #[test]
    fn test_pointer_and_reference_declarators() {
        assert_eq!(type_id("char const * const &").to_string(), "char const* const&");
        assert_eq!(type_id("int (*)[4]").to_string(), "int (*)[4]");
        assert_eq!(type_id("void (*)(int, ...)").to_string(), "void (*)(int, ...)");
        assert_eq!(type_id("int S::*").to_string(), "int S::*");
    }

    #[test]
    fn test_could_be_expression() {
        assert!(type_id("T").could_be_expression());
        assert!(type_id("ns::T<int>").could_be_expression());
        assert!(!type_id("T*").could_be_expression());
        assert!(!type_id("const T").could_be_expression());
        assert!(!type_id("int").could_be_expression());
    }

    #[test]
    fn test_cv_alone_is_not_a_type() {
        let mut parser = parser_for("const *");
        let err = parser.parse_type_id().unwrap_err();
        assert!(err.is_soft());
    }

    #[test]
    fn test_new_type_id_takes_all_bounds() {
        let mut parser = parser_for("int*[n][4]");
        let parsed = parser.parse_new_type_id().unwrap();
        let declarator = parsed.declarator.unwrap();
        assert_eq!(declarator.array_bounds().len(), 2);
        assert!(parser.check(&TokenType::EndOfFile));
    }

    #[test]
    fn test_new_type_id_stops_at_parenthesis() {
        let mut parser = parser_for("T(1, 2)");
        let parsed = parser.parse_new_type_id().unwrap();
        assert!(parsed.declarator.is_none());
        assert!(parser.check(&TokenType::LeftParen));
    }

    #[test]
    fn test_decltype_specifier() {
        assert_eq!(type_id("decltype(a + b)&").to_string(), "decltype(a + b)&");
    }
}
