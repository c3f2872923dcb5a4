//! Source location tracking for error reporting
//!
//! Every token and AST node carries a span so that failures can point at
//! the exact text they concern, both as line/column and as byte offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based, offset is a
/// 0-based byte offset into the input)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32, offset: usize) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
            offset,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0, 0)
    }
}

// Single-line inputs are the common case in tests: column and offset agree
impl SourceLocation {
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self {
            filename: "<input>".to_string(),
            line,
            column,
            offset: column.saturating_sub(1) as usize,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location, end exclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Span running from the start of `first` to the end of `last`
    pub fn between(first: &SourceSpan, last: &SourceSpan) -> Self {
        Self::new(first.start.clone(), last.end.clone())
    }

    /// Create a dummy span for testing
    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}:{}:{}", self.start.filename, self.start.line, self.start.column)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Trait for types that have a source location
pub trait HasSpan {
    fn span(&self) -> SourceSpan;
}

/// Helper for creating source locations while scanning
#[derive(Debug, Clone)]
pub struct SourceTracker {
    filename: String,
    line: u32,
    column: u32,
    offset: usize,
}

impl SourceTracker {
    pub fn new(filename: &str) -> Self {
        Self::starting_at(SourceLocation::new(filename, 1, 1, 0))
    }

    /// Continue counting from `start`, for text cut out of a larger file
    pub fn starting_at(start: SourceLocation) -> Self {
        Self {
            filename: start.filename,
            line: start.line,
            column: start.column,
            offset: start.offset,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get current location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column, self.offset)
    }

    /// Advance by one character
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("expr.cpp", 42, 10, 300);
        assert_eq!(loc.filename, "expr.cpp");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(loc.offset, 300);
        assert_eq!(format!("{}", loc), "expr.cpp:42:10");
    }

    #[test]
    fn test_source_span_same_line() {
        let start = SourceLocation::new("expr.cpp", 1, 5, 4);
        let end = SourceLocation::new("expr.cpp", 1, 10, 9);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "expr.cpp:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let start = SourceLocation::new("expr.cpp", 1, 5, 4);
        let end = SourceLocation::new("expr.cpp", 3, 10, 40);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "expr.cpp:1:5-3:10");
    }

    #[test]
    fn test_source_tracker_counts_bytes() {
        let mut tracker = SourceTracker::new("expr.cpp");
        for ch in "a\u{e9}\nb".chars() {
            tracker.advance(ch);
        }

        let end_loc = tracker.location();
        assert_eq!(end_loc.line, 2);
        assert_eq!(end_loc.column, 2);
        assert_eq!(end_loc.offset, 5);
    }

    #[test]
    fn test_source_tracker_continues_from_a_location() {
        let mut tracker = SourceTracker::starting_at(SourceLocation::new("expr.cpp", 3, 1, 12));
        tracker.advance('x');
        assert_eq!(tracker.location(), SourceLocation::new("expr.cpp", 3, 2, 13));
    }
}
