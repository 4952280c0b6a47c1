//! Scenario runner.

use std::fs;

use semgraft_core::{DiagnosticSink, TracingSink};
use semgraft_graph::Graph;
use semgraft_pattern::{compile_with, Matcher, PatternConfig};
use semgraft_surgery::SurgeryScript;

use crate::assertion::StepOutcome;
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::{Operations, StepSource};
use crate::scenario::{GraphSource, Scenario};

/// Runs a scenario against semgraft.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    operations: Operations,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let operations = scenario.load_operations()?;
        Ok(Self {
            scenario,
            operations,
        })
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        let mut graph = self.load_graph()?;
        let mut sink = TracingSink;

        for step in self.scenario.steps() {
            let source = self
                .operations
                .get_step(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;

            let result = execute(&source, &graph, &mut sink);

            // A surgery step hands its first successful derivation on.
            if let Ok(StepOutcome::Derivations(derivations)) = &result {
                if let Some(next) = derivations.iter().find_map(|d| d.graph()) {
                    graph = next.clone();
                }
            }

            step.assertion.verify(&step.name, &result)?;
        }

        Ok(())
    }

    fn load_graph(&self) -> ScenarioResult<Graph> {
        let name = self.scenario.name();
        match self.scenario.graph_source()? {
            GraphSource::Compact(text) => {
                Graph::from_compact(text).map_err(|e| ScenarioError::graph_load(name, e.to_string()))
            }
            GraphSource::ConlluText(text) => first_sentence(name, text, 0),
            GraphSource::Conllu { path, sentence } => {
                let path = self.scenario.resolve_path(path);
                let text = fs::read_to_string(&path).map_err(|e| ScenarioError::file_read(&path, e))?;
                first_sentence(name, &text, *sentence)
            }
        }
    }
}

fn first_sentence(name: &str, text: &str, index: usize) -> ScenarioResult<Graph> {
    let mut graphs =
        semgraft_conllu::read_str(text).map_err(|e| ScenarioError::graph_load(name, e.to_string()))?;
    if index >= graphs.len() {
        return Err(ScenarioError::graph_load(
            name,
            format!("sentence {} requested, {} available", index, graphs.len()),
        ));
    }
    Ok(graphs.swap_remove(index))
}

fn execute(
    source: &StepSource,
    graph: &Graph,
    sink: &mut dyn DiagnosticSink,
) -> Result<StepOutcome, String> {
    if source.is_surgery() {
        let script = SurgeryScript::parse(&source.pattern, &source.script).map_err(|e| e.to_string())?;
        return Ok(StepOutcome::Derivations(script.apply_with(graph, sink)));
    }

    let pattern =
        compile_with(&source.pattern, PatternConfig::default(), sink).map_err(|e| e.to_string())?;
    let matches = Matcher::new(&pattern, graph).matches_with(sink).collect();
    Ok(StepOutcome::Matches {
        graph: graph.clone(),
        matches,
    })
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;

    #[test]
    fn test_runner_with_inline_operations() {
        let ops_source = r#"
--# find
{}=h >nsubj {}=d

--# detach
{}=h >nsubj=e {}=d
removeEdge -edge e

--# find_again
{}=h >nsubj {}=d
"#;

        let scenario = Scenario::new("inline")
            .compact("[ran nsubj>dogs advmod>fast]")
            .operations_source(ops_source)
            .unwrap()
            .step("find", |a| a.matches(1).binds("h", "ran").binds("d", "dogs"))
            .step("detach", |a| a.derivations(1).renders("[ran advmod>fast] dogs"))
            .step("find_again", |a| a.no_matches());

        scenario.run().unwrap();
    }

    #[test]
    fn test_unknown_step() {
        let scenario = Scenario::new("inline")
            .compact("[ran]")
            .operations_source("--# a\n{}")
            .unwrap()
            .step("b", |a| a.matches(1));

        assert!(scenario.run().is_err());
    }
}
