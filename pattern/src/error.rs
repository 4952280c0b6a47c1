//! Pattern compilation error types.

use semgraft_parser::ParseError;
use std::fmt;
use thiserror::Error;

/// The kind of thing a capture name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    Node,
    Edge,
}

impl fmt::Display for CaptureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureRole::Node => f.write_str("a node"),
            CaptureRole::Edge => f.write_str("an edge"),
        }
    }
}

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Malformed pattern text.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// One name bound to a node in one place and an edge in another.
    #[error("capture '{name}' is used as {first} and as {second}")]
    CaptureRoleConflict {
        name: String,
        first: CaptureRole,
        second: CaptureRole,
    },

    /// An edge capture name used on two relations.
    #[error("edge capture '{name}' is bound by more than one relation")]
    DuplicateEdgeCapture { name: String },

    /// A node name reused with a different description.
    #[error("node '{name}' is described twice with different constraints")]
    ConflictingConstraints { name: String },

    /// A `/regex/` literal that does not compile.
    #[error("invalid regex /{pattern}/: {message}")]
    InvalidRegex { pattern: String, message: String },
}

impl CompileError {
    pub fn capture_role_conflict(
        name: impl Into<String>,
        first: CaptureRole,
        second: CaptureRole,
    ) -> Self {
        Self::CaptureRoleConflict {
            name: name.into(),
            first,
            second,
        }
    }

    pub fn duplicate_edge_capture(name: impl Into<String>) -> Self {
        Self::DuplicateEdgeCapture { name: name.into() }
    }

    pub fn conflicting_constraints(name: impl Into<String>) -> Self {
        Self::ConflictingConstraints { name: name.into() }
    }

    pub fn invalid_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Result type for pattern compilation.
pub type CompileResult<T> = Result<T, CompileError>;
