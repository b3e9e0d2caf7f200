//! Error taxonomy for the front end
//!
//! Two kinds of failure exist. A `FormatError` comes from untrusted input
//! (a wire record that does not describe a known node) and is returned to
//! the caller. A `StructuralError` means the syntax graph itself was built
//! wrong; it is raised as a panic because no partial result is meaningful
//! once the graph's shape is violated.

use crate::ids::NodeId;
use thiserror::Error;

/// Decode failure for wire records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown node kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("record has no 'kind' discriminant")]
    MissingKind,

    #[error("expected a record, found {found}")]
    NotARecord { found: String },

    #[error("malformed '{kind}' record: {message}")]
    Invalid { kind: String, message: String },

    #[error("JSON syntax error at {line}:{column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },
}

impl FormatError {
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        FormatError::UnknownKind { kind: kind.into() }
    }

    pub fn invalid(kind: impl Into<String>, message: impl Into<String>) -> Self {
        FormatError::Invalid {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Json {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Violation of the node model's shape invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("structural error: node {id} is not allocated in this graph")]
    DanglingNode { id: NodeId },

    #[error("structural error: node {id} should be {expected}, found {found}")]
    KindMismatch {
        id: NodeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("structural error: {what} {id} has no {slot}")]
    MissingSlot {
        id: NodeId,
        what: &'static str,
        slot: &'static str,
    },
}

impl StructuralError {
    /// Abort the current operation. Structural errors are modeling bugs,
    /// never bad input.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self)
    }
}

/// Top-level error for tools built on the front end
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_error_messages() {
        assert_eq!(
            FormatError::unknown_kind("BogusExpr").to_string(),
            "unknown node kind 'BogusExpr'"
        );
        assert_eq!(
            FormatError::invalid("CastExpr", "missing field `type`").to_string(),
            "malformed 'CastExpr' record: missing field `type`"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{\"kind\":").unwrap_err();
        match FormatError::from(err) {
            FormatError::Json { line, .. } => assert_eq!(line, 1),
            other => panic!("Expected Json error, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "node #3 is not allocated")]
    fn test_structural_error_panics() {
        StructuralError::DanglingNode { id: NodeId(3) }.raise();
    }

    #[test]
    fn test_frontend_error_wraps_format_error() {
        let err: FrontendError = FormatError::MissingKind.into();
        assert_eq!(err.to_string(), "record has no 'kind' discriminant");
    }
}
