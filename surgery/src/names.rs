//! Capture names resolved against one graph copy.

use crate::{SurgeryError, SurgeryResult};
use semgraft_core::{EdgeId, NodeId};
use semgraft_graph::Graph;
use semgraft_pattern::Match;
use std::collections::BTreeMap;

/// Names visible to the edits of one derivation: the match's captures plus
/// nodes bound by earlier `AddDependentNode` edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    nodes: BTreeMap<String, NodeId>,
    edges: BTreeMap<String, EdgeId>,
}

impl NameTable {
    pub fn from_match(binding: &Match) -> Self {
        Self {
            nodes: binding.nodes().map(|(k, v)| (k.to_string(), v)).collect(),
            edges: binding.edges().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    /// Resolve a node name, failing if the node is gone from `graph`.
    pub fn node(&self, graph: &Graph, name: &str, edit: usize) -> SurgeryResult<NodeId> {
        let id = *self
            .nodes
            .get(name)
            .ok_or_else(|| SurgeryError::unknown_reference(name, edit))?;
        if !graph.contains_node(id) {
            return Err(SurgeryError::stale_reference(name, edit));
        }
        Ok(id)
    }

    /// Resolve an edge name, failing if the edge is gone from `graph`.
    pub fn edge(&self, graph: &Graph, name: &str, edit: usize) -> SurgeryResult<EdgeId> {
        let id = *self
            .edges
            .get(name)
            .ok_or_else(|| SurgeryError::unknown_reference(name, edit))?;
        if !graph.contains_edge(id) {
            return Err(SurgeryError::stale_reference(name, edit));
        }
        Ok(id)
    }

    pub fn bind_node(&mut self, name: impl Into<String>, id: NodeId) {
        self.nodes.insert(name.into(), id);
    }
}
