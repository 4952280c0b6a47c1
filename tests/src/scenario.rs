//! Scenario definition and builder.

use std::path::{Path, PathBuf};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Operations;
use crate::runner::Runner;

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (matches `--# name` in the operations file).
    pub name: String,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// Where the input graph comes from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// Compact text, e.g. `[ran nsubj>dogs]`.
    Compact(String),
    /// One sentence (zero-based) of a CoNLL-U fixture file.
    Conllu { path: PathBuf, sentence: usize },
    /// Inline CoNLL-U text; the first sentence is used.
    ConlluText(String),
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    graph: Option<GraphSource>,
    /// Path to the operations file.
    operations_path: Option<PathBuf>,
    /// Parsed operations (if loaded inline).
    operations: Option<Operations>,
    /// Steps with assertions.
    steps: Vec<Step>,
    /// Base path for resolving relative paths.
    base_path: PathBuf,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: None,
            operations_path: None,
            operations: None,
            steps: Vec::new(),
            base_path: fixtures_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Use a graph in compact form.
    pub fn compact(mut self, text: impl Into<String>) -> Self {
        self.graph = Some(GraphSource::Compact(text.into()));
        self
    }

    /// Use the first sentence of a CoNLL-U file (relative to fixtures/).
    pub fn conllu(self, path: impl Into<PathBuf>) -> Self {
        self.conllu_sentence(path, 0)
    }

    /// Use one sentence of a CoNLL-U file (relative to fixtures/).
    pub fn conllu_sentence(mut self, path: impl Into<PathBuf>, sentence: usize) -> Self {
        self.graph = Some(GraphSource::Conllu {
            path: path.into(),
            sentence,
        });
        self
    }

    /// Use inline CoNLL-U text.
    pub fn conllu_text(mut self, text: impl Into<String>) -> Self {
        self.graph = Some(GraphSource::ConlluText(text.into()));
        self
    }

    /// Set the operations file path (relative to fixtures/).
    pub fn operations(mut self, path: impl Into<PathBuf>) -> Self {
        self.operations_path = Some(path.into());
        self
    }

    /// Load operations from a string.
    pub fn operations_source(mut self, source: &str) -> ScenarioResult<Self> {
        self.operations = Some(Operations::parse(source)?);
        Ok(self)
    }

    /// Add a step with an assertion.
    ///
    /// The step name must match a `--# name` marker in the operations file.
    pub fn step<F>(mut self, name: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step { name, assertion });
        self
    }

    /// Run the scenario and return the result.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self)?.run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the graph source.
    pub fn graph_source(&self) -> ScenarioResult<&GraphSource> {
        self.graph
            .as_ref()
            .ok_or_else(|| ScenarioError::missing_graph(&self.name))
    }

    /// Get the operations, loading from file if needed.
    pub fn load_operations(&self) -> ScenarioResult<Operations> {
        if let Some(ref ops) = self.operations {
            return Ok(ops.clone());
        }
        match &self.operations_path {
            Some(p) => Operations::load(&self.resolve_path(p)),
            None => Err(ScenarioError::missing_operations(&self.name)),
        }
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Resolve a path relative to the base path.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

/// The fixtures directory of this crate.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .compact("[ran nsubj>dogs]")
            .operations("operations/basics.sg")
            .step("find", |a| a.matches(1))
            .step("rewrite", |a| a.derivations(1));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 2);
        assert!(matches!(scenario.graph_source(), Ok(GraphSource::Compact(_))));
        assert_eq!(
            scenario.resolve_path(Path::new("operations/basics.sg")),
            fixtures_root().join("operations/basics.sg")
        );
    }

    #[test]
    fn test_missing_parts() {
        let scenario = Scenario::new("bare");
        assert!(matches!(scenario.graph_source(), Err(ScenarioError::MissingGraph { .. })));
        assert!(matches!(
            scenario.load_operations(),
            Err(ScenarioError::MissingOperations { .. })
        ));
    }
}
