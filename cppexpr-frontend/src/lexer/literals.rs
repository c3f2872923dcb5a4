//! Literal scanning for the C++ lexer
//!
//! This module handles numeric, character, and string literals.

use crate::lexer::{Lexer, TokenType};
use cppexpr_common::CompilerError;

const INTEGER_SUFFIXES: [&str; 8] = ["", "u", "l", "ul", "lu", "ll", "ull", "llu"];

impl Lexer {
    /// Tokenize an integer or floating literal
    pub fn tokenize_number(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.position;

        let radix = match (self.current_char(), self.peek_char(1)) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('b' | 'B')) => 2,
            _ => 10,
        };

        if radix != 10 {
            self.advance(); // '0'
            self.advance(); // 'x' or 'b'
            let digits = self.take_digits(radix);
            if digits.is_empty() {
                return Err(CompilerError::lexer_error(
                    format!("Invalid integer literal: {}", self.text_from(start)),
                    self.current_location(),
                ));
            }
            self.take_integer_suffix(start)?;
            return self.integer_token(&digits, radix, start);
        }

        let mut mantissa = self.take_digits(10);
        let mut is_float = false;

        if self.current_char() == Some('.') {
            is_float = true;
            self.advance();
            mantissa.push('.');
            mantissa.push_str(&self.take_digits(10));
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let digit_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digit_at {
                    if let Some(ch) = self.advance() {
                        mantissa.push(ch);
                    }
                }
                mantissa.push_str(&self.take_digits(10));
            }
        }

        if is_float {
            if matches!(self.current_char(), Some('f' | 'F' | 'l' | 'L')) {
                self.advance();
            }
            self.reject_trailing_identifier(start)?;
            let value = mantissa.parse::<f64>().map_err(|_| {
                CompilerError::lexer_error(
                    format!("Invalid floating literal: {}", self.text_from(start)),
                    self.current_location(),
                )
            })?;
            return Ok(TokenType::FloatLiteral { value, text: self.text_from(start) });
        }

        self.take_integer_suffix(start)?;
        if mantissa.len() > 1 && mantissa.starts_with('0') {
            self.integer_token(&mantissa[1..], 8, start)
        } else {
            self.integer_token(&mantissa, 10, start)
        }
    }

    /// Consume digits of `radix`, skipping `'` separators between digits
    fn take_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_digit(radix) {
                digits.push(ch);
                self.advance();
            } else if ch == '\''
                && !digits.is_empty()
                && self.peek_char(1).is_some_and(|c| c.is_digit(radix))
            {
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    fn take_integer_suffix(&mut self, start: usize) -> Result<(), CompilerError> {
        let mut suffix = String::new();
        while let Some(ch) = self.current_char() {
            if matches!(ch, 'u' | 'U' | 'l' | 'L') {
                suffix.push(ch.to_ascii_lowercase());
                self.advance();
            } else {
                break;
            }
        }

        if !INTEGER_SUFFIXES.contains(&suffix.as_str()) {
            return Err(CompilerError::lexer_error(
                format!("Invalid integer suffix in {}", self.text_from(start)),
                self.current_location(),
            ));
        }
        self.reject_trailing_identifier(start)
    }

    fn reject_trailing_identifier(&mut self, start: usize) -> Result<(), CompilerError> {
        if self.current_char().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            while self.current_char().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                self.advance();
            }
            return Err(CompilerError::lexer_error(
                format!("Invalid suffix on numeric literal: {}", self.text_from(start)),
                self.current_location(),
            ));
        }
        Ok(())
    }

    fn integer_token(&self, digits: &str, radix: u32, start: usize) -> Result<TokenType, CompilerError> {
        let value = u64::from_str_radix(digits, radix).map_err(|_| {
            CompilerError::lexer_error(
                format!("Invalid integer literal: {}", self.text_from(start)),
                self.current_location(),
            )
        })?;
        Ok(TokenType::IntLiteral { value, text: self.text_from(start) })
    }

    /// Decode the escape sequence following a backslash
    fn read_escape(&mut self) -> Result<u32, CompilerError> {
        let ch = self.advance().ok_or_else(|| {
            CompilerError::lexer_error("Unterminated escape sequence".to_string(), self.current_location())
        })?;

        let value = match ch {
            'n' => '\n' as u32,
            't' => '\t' as u32,
            'r' => '\r' as u32,
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0C,
            'v' => 0x0B,
            '\\' | '\'' | '"' | '?' => ch as u32,
            'x' => {
                let digits = self.take_escape_digits(16, usize::MAX);
                if digits.is_empty() {
                    return Err(CompilerError::lexer_error(
                        "Hex escape sequence without digits".to_string(),
                        self.current_location(),
                    ));
                }
                u32::from_str_radix(&digits, 16).map_err(|_| {
                    CompilerError::lexer_error(
                        format!("Hex escape sequence out of range: \\x{digits}"),
                        self.current_location(),
                    )
                })?
            }
            '0'..='7' => {
                let mut digits = ch.to_string();
                digits.push_str(&self.take_escape_digits(8, 2));
                // at most three octal digits, always in range
                u32::from_str_radix(&digits, 8).unwrap_or_default()
            }
            other => {
                return Err(CompilerError::lexer_error(
                    format!("Invalid escape sequence: \\{other}"),
                    self.current_location(),
                ));
            }
        };
        Ok(value)
    }

    fn take_escape_digits(&mut self, radix: u32, max: usize) -> String {
        let mut digits = String::new();
        while digits.len() < max {
            match self.current_char() {
                Some(ch) if ch.is_digit(radix) => {
                    digits.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }
        digits
    }

    /// Tokenize a character literal; the cursor is on the opening quote
    pub fn tokenize_char_literal(&mut self, start: usize) -> Result<TokenType, CompilerError> {
        self.advance(); // Skip opening quote

        let value = match self.current_char() {
            Some('\\') => {
                self.advance();
                self.read_escape()?
            }
            Some(ch) if ch != '\'' && ch != '\n' => {
                self.advance();
                ch as u32
            }
            Some('\'') => {
                return Err(CompilerError::lexer_error(
                    "Empty character literal".to_string(),
                    self.current_location(),
                ));
            }
            _ => {
                return Err(CompilerError::lexer_error(
                    "Unterminated character literal".to_string(),
                    self.current_location(),
                ));
            }
        };

        match self.current_char() {
            Some('\'') => {
                self.advance();
                Ok(TokenType::CharLiteral { value, text: self.text_from(start) })
            }
            Some(ch) if ch != '\n' => Err(CompilerError::lexer_error(
                "Multi-character literal".to_string(),
                self.current_location(),
            )),
            _ => Err(CompilerError::lexer_error(
                "Unterminated character literal".to_string(),
                self.current_location(),
            )),
        }
    }

    /// Tokenize a string literal; the cursor is on the opening quote
    pub fn tokenize_string_literal(&mut self, start: usize) -> Result<TokenType, CompilerError> {
        self.advance(); // Skip opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(TokenType::StringLiteral { value: string, text: self.text_from(start) });
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    let code = self.read_escape()?;
                    let decoded = char::from_u32(code).ok_or_else(|| {
                        CompilerError::lexer_error(
                            format!("Escape sequence is not a character: {code:#x}"),
                            self.current_location(),
                        )
                    })?;
                    string.push(decoded);
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(CompilerError::lexer_error(
            "Unterminated string literal".to_string(),
            self.current_location(),
        ))
    }
}
