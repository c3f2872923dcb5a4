//! Parse error types for the expression parser
//!
//! Soft errors mean "this alternative does not apply" and are recovered by
//! rewinding. Everything else is hard and unwinds to the entry point.

use crate::lexer::Token;
use cppexpr_common::{CompilerError, SourceSpan};
use thiserror::Error;

/// Parse error types specific to the parser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Soft mismatch
    #[error("expected {expected}, found `{}`", .found.token_type)]
    UnexpectedToken { expected: String, found: Token },

    /// A committed construct is missing a required piece
    #[error("expected {expected}, found `{}`", .found.token_type)]
    Expected { expected: String, found: Token },

    #[error("expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize, span: SourceSpan },

    /// `span` covers everything from the first unconsumed token to the end
    #[error("unexpected `{}` after the end of the expression", .found.token_type)]
    TrailingInput { found: Token, span: SourceSpan },

    #[error("expected an expression, found end of input")]
    EmptyInput { span: SourceSpan },
}

impl ParseError {
    pub fn is_soft(&self) -> bool {
        matches!(self, ParseError::UnexpectedToken { .. })
    }

    /// Turn a soft mismatch into a hard failure naming `expected`
    pub fn harden(self, expected: &str) -> ParseError {
        match self {
            ParseError::UnexpectedToken { found, .. } => ParseError::Expected {
                expected: expected.to_string(),
                found,
            },
            hard => hard,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            ParseError::UnexpectedToken { found, .. } | ParseError::Expected { found, .. } => &found.span,
            ParseError::NestingTooDeep { span, .. }
            | ParseError::TrailingInput { span, .. }
            | ParseError::EmptyInput { span } => span,
        }
    }

    /// Byte offset where the failure was detected
    pub fn offset(&self) -> usize {
        self.span().start.offset
    }

    /// Convert into the caller-facing error; `input` spans the whole parse
    pub fn into_compiler_error(self, input: SourceSpan) -> CompilerError {
        CompilerError::parse_error(self.to_string(), self.span().clone(), input)
    }
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        let input = err.span().clone();
        err.into_compiler_error(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;
    use cppexpr_common::SourceLocation;

    fn token(token_type: TokenType, column: u32) -> Token {
        Token::new(
            token_type,
            SourceSpan::new(SourceLocation::new_simple(1, column), SourceLocation::new_simple(1, column + 1)),
        )
    }

    #[test]
    fn test_harden_keeps_location() {
        let soft = ParseError::UnexpectedToken {
            expected: "expression".to_string(),
            found: token(TokenType::RightParen, 4),
        };
        assert!(soft.is_soft());

        let hard = soft.harden("operand of `-`");
        assert!(!hard.is_soft());
        assert_eq!(hard.offset(), 3);
        assert_eq!(hard.to_string(), "expected operand of `-`, found `)`");
    }

    #[test]
    fn test_hard_errors_stay_hard() {
        let err = ParseError::NestingTooDeep { limit: 4, span: SourceSpan::dummy() };
        assert_eq!(err.clone().harden("anything"), err);
    }

    #[test]
    fn test_conversion_carries_input_span() {
        let err = ParseError::Expected {
            expected: "`)`".to_string(),
            found: token(TokenType::EndOfFile, 6),
        };
        let input = SourceSpan::new(SourceLocation::new_simple(1, 1), SourceLocation::new_simple(1, 6));

        match err.into_compiler_error(input.clone()) {
            CompilerError::ParseError { span, input: whole, message } => {
                assert_eq!(span.start.offset, 5);
                assert_eq!(whole, input);
                assert_eq!(message, "expected `)`, found `end of input`");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
