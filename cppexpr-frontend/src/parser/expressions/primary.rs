//! Primary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::types::fundamental_type;
use crate::parser::{NameContext, ParseError, ParseMode, Parser};

impl Parser {
    /// Parse primary expression
    pub fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();
        if self.peek_type().is_literal() {
            return self.parse_literal();
        }

        match self.peek_type() {
            TokenType::This => {
                self.advance();
                Ok(self.node(ExpressionKind::This, start))
            }
            TokenType::LeftParen => self.parse_parenthesized_expression(),
            TokenType::StaticCast | TokenType::DynamicCast | TokenType::ReinterpretCast | TokenType::ConstCast => {
                self.parse_named_cast()
            }
            TokenType::Typeid => self.parse_typeid(),
            _ => {
                if let Some(construct) = self.attempt(|p| p.parse_type_construction())? {
                    return Ok(construct);
                }
                if !self.at_name_start() {
                    return Err(self.unexpected("an expression"));
                }
                let id = self.parse_id_expression(NameContext::Expression)?;
                let span = self.span_from(&start);
                Ok(self.node(ExpressionKind::Id(id), span))
            }
        }
    }

    fn at_name_start(&self) -> bool {
        matches!(
            self.peek_type(),
            TokenType::Identifier(_) | TokenType::ColonColon | TokenType::Tilde | TokenType::Operator
        )
    }

    /// Literal token; adjacent string literals join into one
    fn parse_literal(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();
        let mut literal = match self.peek_type().clone() {
            TokenType::IntLiteral { value, text } => Literal { kind: LiteralKind::Integer(value), text },
            TokenType::FloatLiteral { value, text } => Literal { kind: LiteralKind::Floating(value), text },
            TokenType::CharLiteral { value, text } => Literal { kind: LiteralKind::Character(value), text },
            TokenType::StringLiteral { value, text } => Literal { kind: LiteralKind::String(value), text },
            TokenType::True => Literal { kind: LiteralKind::Boolean(true), text: "true".to_string() },
            TokenType::False => Literal { kind: LiteralKind::Boolean(false), text: "false".to_string() },
            TokenType::Nullptr => Literal { kind: LiteralKind::Nullptr, text: "nullptr".to_string() },
            _ => return Err(self.unexpected("a literal")),
        };
        self.advance();

        if let LiteralKind::String(value) = &mut literal.kind {
            // "hello" "world" becomes "helloworld"
            while let TokenType::StringLiteral { value: next, text } = self.peek_type().clone() {
                self.advance();
                value.push_str(&next);
                literal.text.push(' ');
                literal.text.push_str(&text);
            }
        }

        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Literal(literal), span))
    }

    /// `( expression )`, kept as a node so grouping survives printing
    fn parse_parenthesized_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::LeftParen, "parenthesized expression")?.span;
        let inner = self.with_mode(ParseMode::Expression, |p| {
            p.require("expression in parentheses", |p| p.parse_expression())
        })?;
        self.require_token(TokenType::RightParen, "parenthesized expression")?;
        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Paren(Box::new(inner)), span))
    }

    /// `static_cast<T>(e)` and friends; everything after the keyword is
    /// mandatory
    fn parse_named_cast(&mut self) -> Result<Expression, ParseError> {
        let kind = match self.peek_type() {
            TokenType::StaticCast => CastKind::Static,
            TokenType::DynamicCast => CastKind::Dynamic,
            TokenType::ReinterpretCast => CastKind::Reinterpret,
            TokenType::ConstCast => CastKind::Const,
            _ => return Err(self.unexpected("a named cast")),
        };
        let start = self.advance().span;
        let context = format!("`{kind}`");

        self.require_token(TokenType::Less, &context)?;
        let target_type = self.with_mode(ParseMode::TemplateArguments, |p| {
            p.require(&format!("type in {context}"), |p| p.parse_type_id())
        })?;
        self.require_token(TokenType::Greater, &context)?;
        self.require_token(TokenType::LeftParen, &context)?;
        let operand = self.with_mode(ParseMode::Expression, |p| {
            p.require(&format!("expression in {context}"), |p| p.parse_expression())
        })?;
        self.require_token(TokenType::RightParen, &context)?;

        let span = self.span_from(&start);
        Ok(self.node(
            ExpressionKind::CppCast {
                kind,
                target_type,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `typeid(type-id)` is preferred over `typeid(expression)`
    fn parse_typeid(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(TokenType::Typeid, "typeid expression")?.span;
        self.require_token(TokenType::LeftParen, "`typeid`")?;

        let operand = self.with_mode(ParseMode::Expression, |p| {
            let type_id = p.attempt(|p| {
                let type_id = p.parse_type_id()?;
                if p.check(&TokenType::RightParen) {
                    Ok(type_id)
                } else {
                    Err(p.unexpected("`)` after type"))
                }
            })?;
            match type_id {
                Some(type_id) => Ok(TypeOrExpression::Type(type_id)),
                None => {
                    let expr = p.require("operand of `typeid`", |p| p.parse_expression())?;
                    Ok(TypeOrExpression::Expression(Box::new(expr)))
                }
            }
        })?;
        self.require_token(TokenType::RightParen, "`typeid`")?;

        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Typeid(operand), span))
    }

    /// Explicit type conversion in functional notation: `int(x)`,
    /// `typename T::type{}`, `decltype(x)(y)`, `Point{1, 2}`. A plain name
    /// followed by `(` stays a call.
    fn parse_type_construction(&mut self) -> Result<Expression, ParseError> {
        let start = self.peek().span.clone();

        let target = match self.peek_type().clone() {
            TokenType::Typename => {
                self.advance();
                let name = self.require("name after `typename`", |p| p.parse_id_expression(NameContext::Type))?;
                TypeSpecifier::Elaborated { key: ClassKey::Typename, name }
            }
            TokenType::Decltype => self.parse_decltype()?,
            TokenType::Identifier(_) | TokenType::ColonColon => {
                let name = self.parse_id_expression(NameContext::Type)?;
                if !self.check(&TokenType::LeftBrace) {
                    return Err(self.unexpected("`{` after type name"));
                }
                TypeSpecifier::Named(name)
            }
            token => match fundamental_type(&token) {
                Some(fundamental) => {
                    self.advance();
                    TypeSpecifier::Fundamental(fundamental)
                }
                None => return Err(self.unexpected("an expression")),
            },
        };

        let initializer = self.parse_initializer()?;
        let span = self.span_from(&start);
        Ok(self.node(ExpressionKind::Construct { target, initializer }, span))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use cppexpr_common::CompilerError;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<Expression, CompilerError> {
        let mut lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer.tokenize()?);
        parser.parse()
    }

    fn sexpr(input: &str) -> String {
        parse(input).unwrap().to_sexpr()
    }

    #[test]
    fn test_literals() {
        let expr = parse("u8\"a\" \"b\"").unwrap();
        match expr.kind {
            ExpressionKind::Literal(Literal { kind: LiteralKind::String(value), text }) => {
                assert_eq!(value, "ab");
                assert_eq!(text, "u8\"a\" \"b\"");
            }
            other => panic!("expected string literal, got {other:?}"),
        }
        assert_eq!(sexpr("nullptr"), "nullptr");
        assert_eq!(sexpr("'x'"), "'x'");
        assert_eq!(sexpr("this"), "this");
    }

    #[test]
    fn test_named_casts() {
        assert_eq!(sexpr("static_cast<int*>(p)"), "(static_cast <int*> p)");
        assert_eq!(sexpr("dynamic_cast<Derived&>(*b)"), "(dynamic_cast <Derived&> (* b))");
        assert_eq!(
            sexpr("reinterpret_cast<std::vector<int>*>(raw)"),
            "(reinterpret_cast <std::vector<int>*> raw)"
        );
        assert_eq!(sexpr("const_cast<T>(x, y)"), "(const_cast <T> (comma x y))");
    }

    #[test]
    fn test_named_cast_missing_pieces_are_hard() {
        let cases = [
            ("static_cast int*>(p)", "expected `<` in `static_cast`"),
            ("static_cast<>(p)", "expected type in `static_cast`"),
            ("static_cast<int*(p)", "expected `>` in `static_cast`"),
            ("static_cast<int*>p", "expected `(` in `static_cast`"),
            ("static_cast<int*>()", "expected expression in `static_cast`"),
            ("static_cast<int*>(p", "expected `)` in `static_cast`"),
        ];
        for (input, expected) in cases {
            let err = parse(input).unwrap_err().to_string();
            assert!(err.contains(expected), "{input}: {err}");
        }
    }

    #[test]
    fn test_typeid_prefers_type() {
        assert_eq!(sexpr("typeid(int)"), "(typeid <int>)");
        assert_eq!(sexpr("typeid(x)"), "(typeid <x>)");
        assert_eq!(sexpr("typeid(*p)"), "(typeid (* p))");
        assert_eq!(sexpr("typeid(a + b)"), "(typeid (+ a b))");
    }

    #[test]
    fn test_type_construction() {
        assert_eq!(sexpr("int(x)"), "(construct <int> (args x))");
        assert_eq!(sexpr("Point{1, 2}"), "(construct <Point> (braced 1 2))");
        assert_eq!(sexpr("std::pair<int, int>{}"), "(construct <std::pair<int, int>> (braced))");
        assert_eq!(sexpr("typename T::type()"), "(construct <typename T::type> (args))");
        assert_eq!(sexpr("Point(1, 2)"), "(call Point 1 2)");
    }

    #[test]
    fn test_template_call_in_expression() {
        assert_eq!(sexpr("f<int>(x)"), "(call f<int> x)");
        assert_eq!(sexpr("a < b > c"), "(> (< a b) c)");
        assert_eq!(sexpr("a<b>(c)"), "(call a<b> c)");
    }

    #[test]
    fn test_nothing_to_parse() {
        let err = parse(")").unwrap_err().to_string();
        assert!(err.contains("expected an expression, found `)`"), "{err}");
    }
}
