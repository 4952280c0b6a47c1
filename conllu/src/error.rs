//! Codec error types.

use thiserror::Error;

/// Errors raised while reading or writing CoNLL-U text.
#[derive(Debug, Error)]
pub enum FormatError {
    /// IO error on the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A token row without exactly ten columns.
    #[error("line {line}: expected 10 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    /// An ID that is not `n`, `a-b` or `a.b`.
    #[error("line {line}: invalid ID '{value}'")]
    InvalidId { line: usize, value: String },

    /// A HEAD or DEPS head that is unparseable or names no token.
    #[error("line {line}: invalid head '{value}'")]
    InvalidHead { line: usize, value: String },

    /// Any other structural problem.
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}

impl FormatError {
    pub fn field_count(line: usize, found: usize) -> Self {
        Self::FieldCount { line, found }
    }

    pub fn invalid_id(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidId {
            line,
            value: value.into(),
        }
    }

    pub fn invalid_head(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidHead {
            line,
            value: value.into(),
        }
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::Io(_) => None,
            FormatError::FieldCount { line, .. }
            | FormatError::InvalidId { line, .. }
            | FormatError::InvalidHead { line, .. }
            | FormatError::Malformed { line, .. } => Some(*line),
        }
    }
}

/// Result type for codec operations.
pub type FormatResult<T> = Result<T, FormatError>;
