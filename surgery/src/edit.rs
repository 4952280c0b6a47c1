//! Edit operations.

use semgraft_core::{NodeSpec, Relation};
use semgraft_graph::DEFAULT_WEIGHT;

/// How an edit picks the edge it works on.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeSelector {
    /// An edge capture from the pattern.
    Named(String),
    /// The lowest-id edge between two named nodes, optionally restricted
    /// to one exact relation.
    Between {
        gov: String,
        dep: String,
        relation: Option<Relation>,
    },
}

impl EdgeSelector {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn between(gov: impl Into<String>, dep: impl Into<String>) -> Self {
        Self::Between {
            gov: gov.into(),
            dep: dep.into(),
            relation: None,
        }
    }

    /// Restrict a `Between` selector to one relation.
    pub fn with_relation(self, relation: impl Into<Relation>) -> Self {
        match self {
            Self::Between { gov, dep, .. } => Self::Between {
                gov,
                dep,
                relation: Some(relation.into()),
            },
            named => named,
        }
    }
}

/// Where a newly created node goes in sentence order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodePlacement {
    /// Just before the leftmost node of the governor's subtree, as an
    /// empty-node slot of the preceding word.
    #[default]
    BeforeSubtree,
    /// After the last word of the sentence.
    End,
}

impl NodePlacement {
    pub fn keyword(&self) -> &'static str {
        match self {
            NodePlacement::BeforeSubtree => "before",
            NodePlacement::End => "end",
        }
    }
}

/// A single graph edit. Edits name nodes and edges through pattern
/// captures, or through names introduced by earlier edits.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    RemoveEdge(EdgeSelector),
    AddEdge {
        gov: String,
        dep: String,
        relation: Relation,
        weight: f64,
        extra: bool,
    },
    AddDependentNode {
        gov: String,
        relation: Relation,
        node: NodeSpec,
        placement: Option<NodePlacement>,
        /// Name bound to the new node for later edits.
        name: Option<String>,
    },
    /// Remove the node and its primary-edge descendants.
    DeleteSubgraph { node: String },
    RelabelEdge {
        edge: EdgeSelector,
        relation: Relation,
    },
}

impl EditOp {
    pub fn remove_edge(name: impl Into<String>) -> Self {
        Self::RemoveEdge(EdgeSelector::named(name))
    }

    pub fn remove_edge_between(gov: impl Into<String>, dep: impl Into<String>) -> Self {
        Self::RemoveEdge(EdgeSelector::between(gov, dep))
    }

    pub fn add_edge(
        gov: impl Into<String>,
        dep: impl Into<String>,
        relation: impl Into<Relation>,
    ) -> Self {
        Self::AddEdge {
            gov: gov.into(),
            dep: dep.into(),
            relation: relation.into(),
            weight: DEFAULT_WEIGHT,
            extra: false,
        }
    }

    pub fn add_dependent(gov: impl Into<String>, relation: impl Into<Relation>, node: NodeSpec) -> Self {
        Self::AddDependentNode {
            gov: gov.into(),
            relation: relation.into(),
            node,
            placement: None,
            name: None,
        }
    }

    pub fn delete_subgraph(node: impl Into<String>) -> Self {
        Self::DeleteSubgraph { node: node.into() }
    }

    pub fn relabel_edge(name: impl Into<String>, relation: impl Into<Relation>) -> Self {
        Self::RelabelEdge {
            edge: EdgeSelector::named(name),
            relation: relation.into(),
        }
    }

    /// Mark an `AddEdge` as secondary.
    pub fn extra(mut self) -> Self {
        if let Self::AddEdge { extra, .. } = &mut self {
            *extra = true;
        }
        self
    }

    /// Bind the node an `AddDependentNode` creates.
    pub fn named(mut self, new_name: impl Into<String>) -> Self {
        if let Self::AddDependentNode { name, .. } = &mut self {
            *name = Some(new_name.into());
        }
        self
    }

    /// Choose where an `AddDependentNode` places its node.
    pub fn placed(mut self, at: NodePlacement) -> Self {
        if let Self::AddDependentNode { placement, .. } = &mut self {
            *placement = Some(at);
        }
        self
    }

    /// Command keyword in edit scripts.
    pub fn keyword(&self) -> &'static str {
        match self {
            EditOp::RemoveEdge(_) => "removeEdge",
            EditOp::AddEdge { .. } => "addEdge",
            EditOp::AddDependentNode { .. } => "addDep",
            EditOp::DeleteSubgraph { .. } => "delete",
            EditOp::RelabelEdge { .. } => "relabelEdge",
        }
    }

    /// Node names this edit reads.
    pub fn node_references(&self) -> Vec<&str> {
        match self {
            EditOp::RemoveEdge(selector) | EditOp::RelabelEdge { edge: selector, .. } => {
                match selector {
                    EdgeSelector::Named(_) => Vec::new(),
                    EdgeSelector::Between { gov, dep, .. } => vec![gov.as_str(), dep.as_str()],
                }
            }
            EditOp::AddEdge { gov, dep, .. } => vec![gov.as_str(), dep.as_str()],
            EditOp::AddDependentNode { gov, .. } => vec![gov.as_str()],
            EditOp::DeleteSubgraph { node } => vec![node.as_str()],
        }
    }

    /// Edge names this edit reads.
    pub fn edge_references(&self) -> Vec<&str> {
        match self {
            EditOp::RemoveEdge(EdgeSelector::Named(name))
            | EditOp::RelabelEdge {
                edge: EdgeSelector::Named(name),
                ..
            } => vec![name.as_str()],
            _ => Vec::new(),
        }
    }

    /// Node name this edit introduces.
    pub fn introduces(&self) -> Option<&str> {
        match self {
            EditOp::AddDependentNode { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}
