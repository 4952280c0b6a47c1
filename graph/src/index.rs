//! Adjacency index for edge lookups.

use semgraft_core::{EdgeId, NodeId};
use std::collections::BTreeMap;

/// Adjacency index: NodeId -> edges leaving it and edges entering it.
///
/// Edge lists stay in ascending id order because ids are allocated
/// monotonically and removal preserves order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyIndex {
    outgoing: BTreeMap<NodeId, Vec<EdgeId>>,
    incoming: BTreeMap<NodeId, Vec<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge_id: EdgeId, gov: NodeId, dep: NodeId) {
        self.outgoing.entry(gov).or_default().push(edge_id);
        self.incoming.entry(dep).or_default().push(edge_id);
    }

    pub fn remove(&mut self, edge_id: EdgeId, gov: NodeId, dep: NodeId) {
        Self::remove_from(&mut self.outgoing, gov, edge_id);
        Self::remove_from(&mut self.incoming, dep, edge_id);
    }

    fn remove_from(index: &mut BTreeMap<NodeId, Vec<EdgeId>>, node_id: NodeId, edge_id: EdgeId) {
        if let Some(list) = index.get_mut(&node_id) {
            list.retain(|id| *id != edge_id);
            if list.is_empty() {
                index.remove(&node_id);
            }
        }
    }

    /// Edges whose governor is the node.
    pub fn edges_from(&self, node_id: NodeId) -> &[EdgeId] {
        self.outgoing.get(&node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges whose dependent is the node.
    pub fn edges_to(&self, node_id: NodeId) -> &[EdgeId] {
        self.incoming.get(&node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges touching the node, in ascending id order, without duplicates.
    pub fn edges_involving(&self, node_id: NodeId) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self
            .edges_from(node_id)
            .iter()
            .chain(self.edges_to(node_id))
            .copied()
            .collect();
        edges.sort();
        edges.dedup();
        edges
    }
}
