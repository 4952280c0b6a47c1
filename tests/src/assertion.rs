//! Assertion types and builders for verifying step results.

use semgraft_graph::Graph;
use semgraft_pattern::Match;
use semgraft_surgery::Derivation;

use crate::error::{ScenarioError, ScenarioResult};

/// What a step produced.
#[derive(Debug)]
pub enum StepOutcome {
    /// A match step: the graph it ran against and its bindings.
    Matches { graph: Graph, matches: Vec<Match> },
    /// A surgery step: one derivation per match.
    Derivations(Vec<Derivation>),
}

impl StepOutcome {
    /// Compact renderings of the successful derivations, in match order.
    pub fn renderings(&self) -> Vec<String> {
        match self {
            StepOutcome::Matches { .. } => Vec::new(),
            StepOutcome::Derivations(derivations) => derivations
                .iter()
                .filter_map(Derivation::graph)
                .map(Graph::to_compact_string)
                .collect(),
        }
    }
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Match assertions
    pub matches: Option<usize>,
    pub binds: Vec<(String, String)>,

    // Surgery assertions
    pub derivations: Option<usize>,
    pub failed: Option<usize>,
    pub renders: Option<Vec<String>>,
    pub node_count: Option<usize>,
    pub conllu: Option<String>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&StepOutcome) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("matches", &self.matches)
            .field("binds", &self.binds)
            .field("derivations", &self.derivations)
            .field("failed", &self.failed)
            .field("renders", &self.renders)
            .field("node_count", &self.node_count)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a result.
    pub fn verify(&self, step: &str, result: &Result<StepOutcome, String>) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let result = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(result) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        match result {
            StepOutcome::Matches { graph, matches } => self.verify_matches(step, graph, matches),
            StepOutcome::Derivations(derivations) => {
                self.verify_derivations(step, result, derivations)
            }
        }
    }

    fn verify_matches(&self, step: &str, graph: &Graph, matches: &[Match]) -> ScenarioResult<()> {
        if let Some(expected) = self.matches {
            if matches.len() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} matches, got {}", expected, matches.len()),
                ));
            }
        }

        if !self.binds.is_empty() {
            let first = matches.first().ok_or_else(|| {
                ScenarioError::assertion_failed(step, "expected bindings, but nothing matched")
            })?;
            for (name, word) in &self.binds {
                let bound = first
                    .node(name)
                    .and_then(|id| graph.node(id))
                    .map(|n| n.word.as_str());
                if bound != Some(word.as_str()) {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected {} bound to '{}', got {:?}", name, word, bound),
                    ));
                }
            }
        }

        self.reject_surgery_only(step)
    }

    fn reject_surgery_only(&self, step: &str) -> ScenarioResult<()> {
        if self.derivations.is_some()
            || self.failed.is_some()
            || self.renders.is_some()
            || self.node_count.is_some()
            || self.conllu.is_some()
        {
            return Err(ScenarioError::assertion_failed(
                step,
                "derivation assertions on a match step",
            ));
        }
        Ok(())
    }

    fn verify_derivations(
        &self,
        step: &str,
        outcome: &StepOutcome,
        derivations: &[Derivation],
    ) -> ScenarioResult<()> {
        if self.matches.is_some() || !self.binds.is_empty() {
            return Err(ScenarioError::assertion_failed(
                step,
                "match assertions on a surgery step",
            ));
        }

        if let Some(expected) = self.derivations {
            if derivations.len() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} derivations, got {}", expected, derivations.len()),
                ));
            }
        }

        if let Some(expected) = self.failed {
            let failed = derivations.iter().filter(|d| !d.is_ok()).count();
            if failed != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} failed derivations, got {}", expected, failed),
                ));
            }
        }

        if let Some(ref expected) = self.renders {
            let actual = outcome.renderings();
            if &actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected renderings {:?}, got {:?}", expected, actual),
                ));
            }
        }

        let first = derivations.iter().find_map(Derivation::graph);

        if let Some(expected) = self.node_count {
            let actual = first.map(Graph::node_count);
            if actual != Some(expected) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} nodes, got {:?}", expected, actual),
                ));
            }
        }

        if let Some(ref expected) = self.conllu {
            let actual = first.map(semgraft_conllu::write_graph);
            if actual.as_deref() != Some(expected.as_str()) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected CoNLL-U:\n{}\ngot:\n{}", expected, actual.unwrap_or_default()),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Match assertions ==========

    /// Assert that the pattern matched N times.
    pub fn matches(mut self, n: usize) -> Self {
        self.assertion.matches = Some(n);
        self
    }

    /// Assert that nothing matched.
    pub fn no_matches(self) -> Self {
        self.matches(0)
    }

    /// Assert that the first match binds `name` to a node with this word.
    pub fn binds(mut self, name: &str, word: &str) -> Self {
        self.assertion.binds.push((name.to_string(), word.to_string()));
        self
    }

    // ========== Surgery assertions ==========

    /// Assert the number of derivations (one per match).
    pub fn derivations(mut self, n: usize) -> Self {
        self.assertion.derivations = Some(n);
        self
    }

    /// Assert how many derivations failed.
    pub fn failed(mut self, n: usize) -> Self {
        self.assertion.failed = Some(n);
        self
    }

    /// Assert that exactly one derivation succeeded and renders as given.
    pub fn renders(self, compact: &str) -> Self {
        self.renders_all(&[compact])
    }

    /// Assert the compact renderings of all successful derivations, in order.
    pub fn renders_all(mut self, compact: &[&str]) -> Self {
        self.assertion.renders = Some(compact.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Assert the node count of the first successful derivation.
    pub fn node_count(mut self, n: usize) -> Self {
        self.assertion.node_count = Some(n);
        self
    }

    /// Assert the CoNLL-U text of the first successful derivation.
    pub fn conllu(mut self, text: &str) -> Self {
        self.assertion.conllu = Some(text.to_string());
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&StepOutcome) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraft_core::NodeId;

    fn match_outcome() -> StepOutcome {
        let graph = Graph::from_compact("[ran nsubj>dogs]").unwrap();
        let matches = vec![Match::new().with_node("v", NodeId::new(1))];
        StepOutcome::Matches { graph, matches }
    }

    #[test]
    fn test_match_assertions() {
        let ok = AssertionBuilder::new().matches(1).binds("v", "ran").build();
        assert!(ok.verify("s", &Ok(match_outcome())).is_ok());

        let wrong_word = AssertionBuilder::new().binds("v", "dogs").build();
        assert!(wrong_word.verify("s", &Ok(match_outcome())).is_err());

        let wrong_kind = AssertionBuilder::new().derivations(1).build();
        assert!(wrong_kind.verify("s", &Ok(match_outcome())).is_err());
    }

    #[test]
    fn test_error_assertions() {
        let failed: Result<StepOutcome, String> = Err("edit 0 references unknown name 'x'".to_string());

        assert!(AssertionBuilder::new().error("unknown name").build().verify("s", &failed).is_ok());
        assert!(AssertionBuilder::new()
            .error_matches(r"edit \d+ references")
            .build()
            .verify("s", &failed)
            .is_ok());
        assert!(AssertionBuilder::new().matches(0).build().verify("s", &failed).is_err());
        assert!(AssertionBuilder::new().error("boom").build().verify("s", &Ok(match_outcome())).is_err());
    }

    #[test]
    fn test_custom_assertion() {
        let assertion = AssertionBuilder::new()
            .assert_fn(|o| matches!(o, StepOutcome::Matches { matches, .. } if matches.len() == 1))
            .build();
        assert!(assertion.verify("s", &Ok(match_outcome())).is_ok());
    }
}
