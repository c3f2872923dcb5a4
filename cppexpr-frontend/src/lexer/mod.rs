//! C++ expression lexer
//!
//! Tokenizes C++ expression source into a stream of tokens.
//! Handles keywords, punctuators, literals, identifiers, and comments.

pub mod literals;
pub mod operators;
pub mod token;

pub use token::{Token, TokenType};

use cppexpr_common::{CompilerError, SourceLocation, SourceSpan, SourceTracker};
use log::debug;

/// C++ expression lexer
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    tracker: SourceTracker,
}

impl Lexer {
    /// Create a new lexer for anonymous input
    pub fn new(input: &str) -> Self {
        Self::with_filename(input, "<input>")
    }

    /// Create a new lexer whose locations name `filename`
    pub fn with_filename(input: &str, filename: &str) -> Self {
        Self::starting_at(input, SourceLocation::new(filename, 1, 1, 0))
    }

    /// Lex `input` as text found at `start` inside a larger file
    pub fn starting_at(input: &str, start: SourceLocation) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            tracker: SourceTracker::starting_at(start),
        }
    }

    /// Get current character
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.tracker.advance(ch);
        Some(ch)
    }

    /// Get current location
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.tracker.location()
    }

    /// Source text between a saved character index and the cursor
    pub(crate) fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Skip whitespace (except newlines)
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() && ch != '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Tokenize an identifier, keyword, or prefixed character/string literal
    fn tokenize_identifier(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.position;
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Encoding prefixes: L'x', u"..", U"..", u8".."
        if matches!(identifier.as_str(), "L" | "u" | "U" | "u8") {
            match self.current_char() {
                Some('\'') => return self.tokenize_char_literal(start),
                Some('"') => return self.tokenize_string_literal(start),
                _ => {}
            }
        }

        Ok(TokenType::keyword(&identifier).unwrap_or(TokenType::Identifier(identifier)))
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace();

        let start_location = self.current_location();
        let start = self.position;

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some('\n') => {
                self.advance();
                TokenType::Newline
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' => self.tokenize_identifier()?,

            Some(ch) if ch.is_ascii_digit() => self.tokenize_number()?,

            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.tokenize_number()?
            }

            Some('\'') => self.tokenize_char_literal(start)?,

            Some('"') => self.tokenize_string_literal(start)?,

            Some(ch) => self.tokenize_operator(ch)?,
        };

        let span = SourceSpan::new(start_location, self.current_location());
        Ok(Token::new(token_type, span))
    }

    /// Tokenize entire input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        debug!("lexed {} tokens from {}", tokens.len(), self.tracker.filename());
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_types(input: &str) -> Vec<TokenType> {
        let mut lexer = Lexer::new(input);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    fn int(value: u64, text: &str) -> TokenType {
        TokenType::IntLiteral { value, text: text.to_string() }
    }

    #[test]
    fn test_keywords() {
        let tokens = token_types("int sizeof static_cast this nullptr alignof value");

        assert_eq!(
            tokens,
            vec![
                TokenType::Int,
                TokenType::Sizeof,
                TokenType::StaticCast,
                TokenType::This,
                TokenType::Nullptr,
                TokenType::Alignof,
                TokenType::Identifier("value".to_string()),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_operators_take_longest_match() {
        let tokens = token_types("<<= << <= < && &= & ->* -> .* ... :: : -- -=");

        assert_eq!(
            tokens,
            vec![
                TokenType::LeftShiftEqual,
                TokenType::LeftShift,
                TokenType::LessEqual,
                TokenType::Less,
                TokenType::AmpersandAmpersand,
                TokenType::AmpersandEqual,
                TokenType::Ampersand,
                TokenType::ArrowStar,
                TokenType::Arrow,
                TokenType::DotStar,
                TokenType::Ellipsis,
                TokenType::ColonColon,
                TokenType::Colon,
                TokenType::MinusMinus,
                TokenType::MinusEqual,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_greater_is_never_merged() {
        let mut lexer = Lexer::new("a >> b >>= c");
        let tokens = lexer.tokenize().unwrap();
        let types: Vec<_> = tokens.iter().map(|t| t.token_type.clone()).collect();

        assert_eq!(
            types,
            vec![
                TokenType::Identifier("a".to_string()),
                TokenType::Greater,
                TokenType::Greater,
                TokenType::Identifier("b".to_string()),
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Identifier("c".to_string()),
                TokenType::EndOfFile,
            ]
        );
        assert!(tokens[1].touches(&tokens[2]));
        assert!(tokens[4].touches(&tokens[5]));
        assert!(!tokens[0].touches(&tokens[1]));
    }

    #[test]
    fn test_integer_literals() {
        let tokens = token_types("42 0x1F 017 0b101 1'000'000 10ul 7LL");

        assert_eq!(
            tokens,
            vec![
                int(42, "42"),
                int(31, "0x1F"),
                int(15, "017"),
                int(5, "0b101"),
                int(1_000_000, "1'000'000"),
                int(10, "10ul"),
                int(7, "7LL"),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_float_literals() {
        let tokens = token_types("1.5 .25 2e3 1.0f 3.E-2");

        let values: Vec<f64> = tokens
            .iter()
            .filter_map(|t| match t {
                TokenType::FloatLiteral { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![1.5, 0.25, 2000.0, 1.0, 0.03]);
    }

    #[test]
    fn test_char_and_string_literals() {
        let tokens = token_types(r#"'a' '\n' L'x' '\x41' "hi\tthere" u8"s""#);

        assert_eq!(
            tokens,
            vec![
                TokenType::CharLiteral { value: 'a' as u32, text: "'a'".to_string() },
                TokenType::CharLiteral { value: '\n' as u32, text: r"'\n'".to_string() },
                TokenType::CharLiteral { value: 'x' as u32, text: "L'x'".to_string() },
                TokenType::CharLiteral { value: 0x41, text: r"'\x41'".to_string() },
                TokenType::StringLiteral {
                    value: "hi\tthere".to_string(),
                    text: r#""hi\tthere""#.to_string(),
                },
                TokenType::StringLiteral { value: "s".to_string(), text: r#"u8"s""#.to_string() },
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = token_types("// line comment\n/* block comment */");

        assert_eq!(
            tokens,
            vec![
                TokenType::LineComment(" line comment".to_string()),
                TokenType::Newline,
                TokenType::BlockComment(" block comment ".to_string()),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_spans_track_lines_and_offsets() {
        let mut lexer = Lexer::with_filename("a +\n  bc", "expr.cpp");
        let tokens = lexer.tokenize().unwrap();

        let bc = &tokens[3];
        assert_eq!(bc.token_type, TokenType::Identifier("bc".to_string()));
        assert_eq!(bc.span.start.line, 2);
        assert_eq!(bc.span.start.column, 3);
        assert_eq!(bc.span.start.offset, 6);
        assert_eq!(bc.span.end.offset, 8);
        assert_eq!(bc.span.start.filename, "expr.cpp");
    }

    #[test]
    fn test_lex_errors() {
        for input in ["'ab'", "\"open", "0x", "12abc", "/* open", "@", "'\\q'"] {
            let mut lexer = Lexer::new(input);
            assert!(
                matches!(lexer.tokenize(), Err(CompilerError::LexError { .. })),
                "expected a lexical error for {input:?}"
            );
        }
    }
}
