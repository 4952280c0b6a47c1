//! Capture bindings produced by the matcher.

use semgraft_core::{EdgeId, NodeId};
use std::collections::BTreeMap;
use std::fmt;

/// One satisfying assignment of a pattern's captures.
///
/// A match is a snapshot: it refers to nodes and edges by id, and the ids
/// stay meaningful on any copy of the graph it was produced from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    nodes: BTreeMap<String, NodeId>,
    edges: BTreeMap<String, EdgeId>,
}

impl Match {
    /// Create an empty match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone with an additional node binding.
    pub fn with_node(mut self, name: impl Into<String>, id: NodeId) -> Self {
        self.nodes.insert(name.into(), id);
        self
    }

    /// Clone with an additional edge binding.
    pub fn with_edge(mut self, name: impl Into<String>, id: EdgeId) -> Self {
        self.edges.insert(name.into(), id);
        self
    }

    pub(crate) fn insert_node(&mut self, name: &str, id: NodeId) {
        self.nodes.insert(name.to_string(), id);
    }

    pub(crate) fn insert_edge(&mut self, name: &str, id: EdgeId) {
        self.edges.insert(name.to_string(), id);
    }

    /// Get the node bound to a name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes.get(name).copied()
    }

    /// Get the edge bound to a name.
    pub fn edge(&self, name: &str) -> Option<EdgeId> {
        self.edges.get(name).copied()
    }

    /// Node bindings in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Edge bindings in name order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, EdgeId)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (name, id) in self.nodes() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", name, id)?;
        }
        for (name, id) in self.edges() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", name, id)?;
        }
        write!(f, "}}")
    }
}
