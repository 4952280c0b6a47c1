//! Surgery error types.

use semgraft_core::GraphError;
use semgraft_pattern::CompileError;
use thiserror::Error;

/// Result type for surgery operations.
pub type SurgeryResult<T> = Result<T, SurgeryError>;

/// Errors that can occur while building or applying an edit list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurgeryError {
    /// An edit names a capture the pattern never binds.
    #[error("edit {edit} references unknown name '{name}'")]
    UnknownReference { name: String, edit: usize },

    /// An edit introduces a name that is already bound.
    #[error("edit {edit} introduces name '{name}', which is already bound")]
    DuplicateName { name: String, edit: usize },

    /// An edit names a node or edge removed by an earlier edit.
    #[error("edit {edit} references '{name}', which an earlier edit removed")]
    StaleReference { name: String, edit: usize },

    /// Malformed edit-script text.
    #[error("edit script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error(transparent)]
    Pattern(#[from] CompileError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl SurgeryError {
    pub fn unknown_reference(name: impl Into<String>, edit: usize) -> Self {
        Self::UnknownReference {
            name: name.into(),
            edit,
        }
    }

    pub fn duplicate_name(name: impl Into<String>, edit: usize) -> Self {
        Self::DuplicateName {
            name: name.into(),
            edit,
        }
    }

    pub fn stale_reference(name: impl Into<String>, edit: usize) -> Self {
        Self::StaleReference {
            name: name.into(),
            edit,
        }
    }

    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    /// Returns true for errors about names an edit refers to.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownReference { .. } | Self::DuplicateName { .. } | Self::StaleReference { .. }
        )
    }
}
