//! Error types for the scenario framework.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse an operations file.
    #[error("failed to parse operations file '{path}': {message}")]
    OperationsParse { path: PathBuf, message: String },

    /// The input graph could not be built.
    #[error("failed to load graph for scenario '{scenario}': {message}")]
    GraphLoad { scenario: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Step not found in operations file.
    #[error("step '{step}' not found in operations file")]
    StepNotFound { step: String },

    /// No graph source was given.
    #[error("graph not specified for scenario '{scenario}'")]
    MissingGraph { scenario: String },

    /// No operations were given.
    #[error("operations not specified for scenario '{scenario}'")]
    MissingOperations { scenario: String },
}

impl ScenarioError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn operations_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OperationsParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn graph_load(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GraphLoad {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_graph(scenario: impl Into<String>) -> Self {
        Self::MissingGraph {
            scenario: scenario.into(),
        }
    }

    pub fn missing_operations(scenario: impl Into<String>) -> Self {
        Self::MissingOperations {
            scenario: scenario.into(),
        }
    }
}
