//! Punctuator and comment scanning for the C++ lexer
//!
//! Every punctuator takes its longest spelling except `>`, which is always
//! a single character so that `>>` can close two template argument lists.

use crate::lexer::{Lexer, TokenType};
use cppexpr_common::CompilerError;

impl Lexer {
    /// Consume `ch` and pick between `plain` and the `=` compound form
    fn with_equal(&mut self, plain: TokenType, compound: TokenType) -> TokenType {
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
            compound
        } else {
            plain
        }
    }

    /// Tokenize a punctuator or comment starting at `ch`
    pub fn tokenize_operator(&mut self, ch: char) -> Result<TokenType, CompilerError> {
        let token_type = match ch {
            '+' if self.peek_char(1) == Some('+') => {
                self.advance();
                self.advance();
                TokenType::PlusPlus
            }
            '+' => self.with_equal(TokenType::Plus, TokenType::PlusEqual),

            '-' => match self.peek_char(1) {
                Some('-') => {
                    self.advance();
                    self.advance();
                    TokenType::MinusMinus
                }
                Some('>') => {
                    self.advance();
                    self.advance();
                    if self.current_char() == Some('*') {
                        self.advance();
                        TokenType::ArrowStar
                    } else {
                        TokenType::Arrow
                    }
                }
                _ => self.with_equal(TokenType::Minus, TokenType::MinusEqual),
            },

            '*' => self.with_equal(TokenType::Star, TokenType::StarEqual),

            '/' => match self.peek_char(1) {
                Some('/') => self.tokenize_line_comment(),
                Some('*') => self.tokenize_block_comment()?,
                _ => self.with_equal(TokenType::Slash, TokenType::SlashEqual),
            },

            '%' => self.with_equal(TokenType::Percent, TokenType::PercentEqual),

            '&' if self.peek_char(1) == Some('&') => {
                self.advance();
                self.advance();
                TokenType::AmpersandAmpersand
            }
            '&' => self.with_equal(TokenType::Ampersand, TokenType::AmpersandEqual),

            '|' if self.peek_char(1) == Some('|') => {
                self.advance();
                self.advance();
                TokenType::PipePipe
            }
            '|' => self.with_equal(TokenType::Pipe, TokenType::PipeEqual),

            '^' => self.with_equal(TokenType::Caret, TokenType::CaretEqual),
            '!' => self.with_equal(TokenType::Bang, TokenType::BangEqual),
            '=' => self.with_equal(TokenType::Equal, TokenType::EqualEqual),

            '<' if self.peek_char(1) == Some('<') => {
                self.advance();
                self.with_equal(TokenType::LeftShift, TokenType::LeftShiftEqual)
            }
            '<' => self.with_equal(TokenType::Less, TokenType::LessEqual),

            '>' => self.with_equal(TokenType::Greater, TokenType::GreaterEqual),

            ':' if self.peek_char(1) == Some(':') => {
                self.advance();
                self.advance();
                TokenType::ColonColon
            }

            '.' => match (self.peek_char(1), self.peek_char(2)) {
                (Some('.'), Some('.')) => {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenType::Ellipsis
                }
                (Some('*'), _) => {
                    self.advance();
                    self.advance();
                    TokenType::DotStar
                }
                _ => {
                    self.advance();
                    TokenType::Dot
                }
            },

            _ => {
                let single = match ch {
                    '~' => TokenType::Tilde,
                    '?' => TokenType::Question,
                    ':' => TokenType::Colon,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    '{' => TokenType::LeftBrace,
                    '}' => TokenType::RightBrace,
                    '[' => TokenType::LeftBracket,
                    ']' => TokenType::RightBracket,
                    ';' => TokenType::Semicolon,
                    ',' => TokenType::Comma,
                    _ => {
                        return Err(CompilerError::lexer_error(
                            format!("Unexpected character: {}", ch),
                            self.current_location(),
                        ));
                    }
                };
                self.advance();
                single
            }
        };

        Ok(token_type)
    }

    /// Tokenize line comment
    pub fn tokenize_line_comment(&mut self) -> TokenType {
        self.advance(); // Skip first '/'
        self.advance(); // Skip second '/'

        let mut comment = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            comment.push(ch);
            self.advance();
        }

        TokenType::LineComment(comment)
    }

    /// Tokenize block comment
    pub fn tokenize_block_comment(&mut self) -> Result<TokenType, CompilerError> {
        self.advance(); // Skip '/'
        self.advance(); // Skip '*'

        let mut comment = String::new();

        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.advance(); // Skip '*'
                self.advance(); // Skip '/'
                return Ok(TokenType::BlockComment(comment));
            }
            comment.push(ch);
            self.advance();
        }

        Err(CompilerError::lexer_error(
            "Unterminated block comment".to_string(),
            self.current_location(),
        ))
    }
}
