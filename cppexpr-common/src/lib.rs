//! C++ expression parser - Common Types and Utilities
//!
//! This crate contains the source-location types and the error and
//! diagnostic definitions shared by the lexer, the parser and the driver.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter};
pub use source_loc::{HasSpan, SourceLocation, SourceSpan, SourceTracker};
