//! Applying an edit list to every match of a pattern.

use crate::ops;
use crate::{
    parse_edits, validate_edits, Derivation, EditOp, EditOutcome, NameTable, SurgeryConfig,
    SurgeryResult,
};
use semgraft_core::{DiagnosticSink, NullSink, Stage};
use semgraft_graph::Graph;
use semgraft_pattern::{compile, CompiledPattern, Match, Matcher};

/// A compiled pattern paired with a validated edit list.
#[derive(Debug, Clone)]
pub struct SurgeryScript {
    pattern: CompiledPattern,
    edits: Vec<EditOp>,
    config: SurgeryConfig,
}

impl SurgeryScript {
    /// Pair a pattern with edits, rejecting references to unbound names.
    pub fn new(pattern: CompiledPattern, edits: Vec<EditOp>) -> SurgeryResult<Self> {
        validate_edits(&pattern, &edits)?;
        Ok(Self {
            pattern,
            edits,
            config: SurgeryConfig::default(),
        })
    }

    /// Compile pattern text and parse edit-script text.
    pub fn parse(pattern: &str, script: &str) -> SurgeryResult<Self> {
        Self::new(compile(pattern)?, parse_edits(script)?)
    }

    pub fn with_config(mut self, config: SurgeryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn edits(&self) -> &[EditOp] {
        &self.edits
    }

    pub fn config(&self) -> &SurgeryConfig {
        &self.config
    }

    /// One derivation per match, in match order. The input graph is never
    /// modified.
    pub fn apply(&self, graph: &Graph) -> Vec<Derivation> {
        self.apply_with(graph, &mut NullSink)
    }

    pub fn apply_with(&self, graph: &Graph, sink: &mut dyn DiagnosticSink) -> Vec<Derivation> {
        let bindings: Vec<Match> = Matcher::new(&self.pattern, graph).matches_with(sink).collect();

        let mut derivations = Vec::with_capacity(bindings.len());
        for (index, binding) in bindings.into_iter().enumerate() {
            let outcome = self.apply_to_match(graph, &binding, sink);
            if let Err(err) = &outcome {
                sink.warning(Stage::Surgery, || format!("match {} {}: {}", index, binding, err));
            }
            derivations.push(Derivation { binding, outcome });
        }

        sink.info(Stage::Surgery, || {
            let ok = derivations.iter().filter(|d| d.is_ok()).count();
            format!(
                "{} edits over {} matches: {} applied, {} failed",
                self.edits.len(),
                derivations.len(),
                ok,
                derivations.len() - ok
            )
        });
        derivations
    }

    /// Run the edit list against a fresh copy of `graph` for one match.
    pub fn apply_to_match(
        &self,
        graph: &Graph,
        binding: &Match,
        sink: &mut dyn DiagnosticSink,
    ) -> SurgeryResult<Graph> {
        let mut copy = graph.clone();
        let mut names = NameTable::from_match(binding);

        for (index, edit) in self.edits.iter().enumerate() {
            let outcome = self.execute(&mut copy, &mut names, edit, index)?;
            sink.debug(Stage::Surgery, || format!("{} [{}]: {}", edit.keyword(), index, outcome));
        }

        if self.config.reconcile_roots {
            copy.reconcile_roots();
        }
        Ok(copy)
    }

    fn execute(
        &self,
        graph: &mut Graph,
        names: &mut NameTable,
        edit: &EditOp,
        index: usize,
    ) -> SurgeryResult<EditOutcome> {
        match edit {
            EditOp::RemoveEdge(selector) => ops::execute_remove_edge(graph, names, selector, index),
            EditOp::AddEdge {
                gov,
                dep,
                relation,
                weight,
                extra,
            } => ops::execute_add_edge(graph, names, gov, dep, relation, *weight, *extra, index),
            EditOp::AddDependentNode {
                gov,
                relation,
                node,
                placement,
                name,
            } => ops::execute_add_dependent(
                graph,
                names,
                gov,
                relation,
                node,
                placement.unwrap_or(self.config.placement),
                name.as_deref(),
                index,
            ),
            EditOp::DeleteSubgraph { node } => ops::execute_delete_subgraph(graph, names, node, index),
            EditOp::RelabelEdge { edge, relation } => {
                ops::execute_relabel_edge(graph, names, edge, relation, index)
            }
        }
    }
}

/// Validate `edits` against `pattern` and apply them to every match.
pub fn apply(pattern: &CompiledPattern, edits: &[EditOp], graph: &Graph) -> SurgeryResult<Vec<Derivation>> {
    let script = SurgeryScript::new(pattern.clone(), edits.to_vec())?;
    Ok(script.apply(graph))
}
