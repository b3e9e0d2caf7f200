//! Source positions attached to syntax nodes
//!
//! Spans are carried for diagnostics only: no traversal or rendering
//! decision depends on them, and nodes built without a parser get the
//! dummy span.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Location for synthesized nodes
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    pub fn is_dummy(&self) -> bool {
        self.line == 0
    }

    fn precedes(&self, other: &SourceLocation) -> bool {
        (self.line, self.column) <= (other.line, other.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }

    pub fn is_dummy(&self) -> bool {
        self.start.is_dummy() && self.end.is_dummy()
    }

    /// Smallest span covering both `self` and `other`. Spans from different
    /// files do not merge; a dummy span yields to a real one.
    pub fn extend(&self, other: &SourceSpan) -> SourceSpan {
        if self.is_dummy() {
            return other.clone();
        }
        if other.is_dummy() || self.start.filename != other.start.filename {
            return self.clone();
        }

        let start = if self.start.precedes(&other.start) {
            self.start.clone()
        } else {
            other.start.clone()
        };
        let end = if other.end.precedes(&self.end) {
            self.end.clone()
        } else {
            other.end.clone()
        };
        SourceSpan::new(start, end)
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line != self.end.line {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        } else if self.start.column == self.end.column {
            write!(f, "{}:{}", self.start.filename, self.start.line)
        } else {
            write!(
                f,
                "{}:{}:{}-{}",
                self.start.filename, self.start.line, self.start.column, self.end.column
            )
        }
    }
}

/// Trait for values that know where they came from
pub trait HasSpan {
    fn span(&self) -> SourceSpan;
}
