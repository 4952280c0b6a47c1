//! Edit and derivation results.

use crate::SurgeryResult;
use semgraft_core::{EdgeId, NodeId, Position, Relation};
use semgraft_graph::Graph;
use semgraft_pattern::Match;
use std::fmt;

/// What a single edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    EdgeRemoved(EdgeId),
    EdgeAdded(EdgeId),
    /// An identical edge was already present.
    EdgeExists(EdgeId),
    NodeAdded {
        node: NodeId,
        edge: EdgeId,
        position: Position,
    },
    SubgraphDeleted { nodes: Vec<NodeId>, edges: usize },
    EdgeRelabeled { edge: EdgeId, previous: Relation },
    /// The selected edge does not exist; nothing changed.
    Unchanged,
}

impl EditOutcome {
    /// Returns true if the edit changed the graph.
    pub fn changed(&self) -> bool {
        !matches!(self, EditOutcome::EdgeExists(_) | EditOutcome::Unchanged)
    }

    pub fn created_node(&self) -> Option<NodeId> {
        match self {
            EditOutcome::NodeAdded { node, .. } => Some(*node),
            _ => None,
        }
    }

    pub fn deleted_nodes(&self) -> &[NodeId] {
        match self {
            EditOutcome::SubgraphDeleted { nodes, .. } => nodes,
            _ => &[],
        }
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::EdgeRemoved(id) => write!(f, "removed edge {}", id),
            EditOutcome::EdgeAdded(id) => write!(f, "added edge {}", id),
            EditOutcome::EdgeExists(id) => write!(f, "edge {} already present", id),
            EditOutcome::NodeAdded {
                node,
                edge,
                position,
            } => write!(f, "added node {} at {} via edge {}", node, position, edge),
            EditOutcome::SubgraphDeleted { nodes, edges } => {
                write!(f, "deleted {} nodes and {} edges", nodes.len(), edges)
            }
            EditOutcome::EdgeRelabeled { edge, previous } => {
                write!(f, "relabeled edge {} (was {})", edge, previous)
            }
            EditOutcome::Unchanged => write!(f, "no matching edge"),
        }
    }
}

/// The result of applying an edit list to one match.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// The match, against the input graph, that drove the edits.
    pub binding: Match,
    /// The edited copy, or why this match could not be applied.
    pub outcome: SurgeryResult<Graph>,
}

impl Derivation {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.outcome.as_ref().ok()
    }

    pub fn into_graph(self) -> SurgeryResult<Graph> {
        self.outcome
    }
}
