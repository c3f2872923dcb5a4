//! Error handling for the C++ expression parser
//!
//! This module defines the error type surfaced to callers of the frontend
//! and the diagnostic utilities the driver uses to report them.

use crate::source_loc::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type covering every phase a parse goes through
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    /// `span` is where the parse failed, `input` is the whole parsed text
    #[error("Parse error at {span}: {message}")]
    ParseError {
        span: SourceSpan,
        input: SourceSpan,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// A located error message with any follow-up notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: SourceSpan,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: SourceSpan) -> Self {
        Self {
            message,
            span,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl From<&CompilerError> for Diagnostic {
    fn from(err: &CompilerError) -> Self {
        match err {
            CompilerError::LexError { location, message } => {
                Diagnostic::error(message.clone(), SourceSpan::from_location(location.clone()))
            }
            CompilerError::ParseError { span, input, message } => {
                Diagnostic::error(message.clone(), span.clone()).with_note(format!(
                    "failed at bytes {}..{} of input {}..{}",
                    span.start.offset, span.end.offset, input.start.offset, input.end.offset
                ))
            }
            CompilerError::ConfigError { message }
            | CompilerError::IoError { message }
            | CompilerError::InternalError { message } => {
                Diagnostic::error(message.clone(), SourceSpan::dummy())
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.span, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Collects the failures of a multi-expression run for reporting at the end
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Record a failed parse; the returned diagnostic can still take notes
    pub fn report(&mut self, err: &CompilerError) -> &mut Diagnostic {
        let index = self.diagnostics.len();
        self.diagnostics.push(Diagnostic::from(err));
        &mut self.diagnostics[index]
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.error_count() {
            0 => "No errors".to_string(),
            1 => "1 error".to_string(),
            n => format!("{} errors", n),
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, span: SourceSpan, input: SourceSpan) -> Self {
        CompilerError::ParseError { span, input, message }
    }

    /// Create a configuration error
    pub fn config_error(message: String) -> Self {
        CompilerError::ConfigError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}
