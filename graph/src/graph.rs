//! Core graph storage implementation.

use crate::index::AdjacencyIndex;
use semgraft_core::{
    Edge, EdgeId, GraphError, GraphResult, Node, NodeId, NodeSpec, Position, Relation,
};
use std::collections::BTreeSet;

/// Default weight of edges created without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A multiword token: one surface form realized by several word nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiwordSpan {
    /// First word position covered.
    pub first: u32,
    /// Last word position covered (inclusive).
    pub last: u32,
    /// Surface text of the whole token.
    pub form: String,
    pub misc: Option<String>,
    pub line: Option<usize>,
}

impl MultiwordSpan {
    pub fn new(first: u32, last: u32, form: impl Into<String>) -> Self {
        Self {
            first,
            last,
            form: form.into(),
            misc: None,
            line: None,
        }
    }

    /// Returns true if the word position lies inside the span.
    pub fn covers(&self, word: u32) -> bool {
        self.first <= word && word <= self.last
    }
}

/// An in-memory dependency graph.
///
/// Nodes and edges live in arenas indexed by their ids. Removed slots are
/// left empty so ids stay stable and are never reused. Cloning a graph
/// deep-copies every node and edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    /// Node storage, indexed by NodeId
    nodes: Vec<Option<Node>>,
    /// Edge storage, indexed by EdgeId
    edges: Vec<Option<Edge>>,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    roots: BTreeSet<NodeId>,
    comments: Vec<String>,
    spans: Vec<MultiwordSpan>,
    node_count: usize,
    edge_count: usize,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Node Operations ====================

    /// The id the next `add_node` call will assign. Ids start at 1 so
    /// ordinary tokens can share their sentence position.
    pub fn next_node_id(&self) -> NodeId {
        NodeId::new(self.nodes.len().max(1) as u32)
    }

    /// Create a node with a fresh id.
    pub fn add_node(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.next_node_id();
        self.store_node(id, spec);
        id
    }

    /// Create a node with a caller-chosen id.
    pub fn insert_node(&mut self, id: NodeId, spec: NodeSpec) -> GraphResult<()> {
        if self.contains_node(id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.store_node(id, spec);
        Ok(())
    }

    fn store_node(&mut self, id: NodeId, spec: NodeSpec) {
        let position = spec.position.unwrap_or_else(|| Position::word(id.raw()));
        if self.nodes.len() <= id.index() {
            self.nodes.resize(id.index() + 1, None);
        }
        self.nodes[id.index()] = Some(Node::from_spec(id, position, spec));
        self.node_count += 1;
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Remove a node, every edge touching it, and its root status.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        if !self.contains_node(id) {
            return Err(GraphError::NodeNotFound(id));
        }

        for edge_id in self.adj_index.edges_involving(id) {
            self.remove_edge(edge_id)?;
        }

        self.roots.remove(&id);
        self.node_count -= 1;
        self.nodes[id.index()]
            .take()
            .ok_or(GraphError::NodeNotFound(id))
    }

    // ==================== Edge Operations ====================

    /// Create an edge between two existing nodes.
    pub fn add_edge(
        &mut self,
        gov: NodeId,
        dep: NodeId,
        relation: impl Into<Relation>,
        weight: f64,
        extra: bool,
    ) -> GraphResult<EdgeId> {
        for node_id in [gov, dep] {
            if !self.contains_node(node_id) {
                return Err(GraphError::NodeNotFound(node_id));
            }
        }

        let id = EdgeId::new(self.edges.len() as u32);
        let edge = Edge::new(id, gov, dep, relation.into(), weight, extra);
        self.adj_index.insert(id, gov, dep);
        self.edges.push(Some(edge));
        self.edge_count += 1;
        Ok(id)
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Remove an edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(id))?;
        self.adj_index.remove(id, edge.gov, edge.dep);
        self.edge_count -= 1;
        Ok(edge)
    }

    /// Change the relation of an edge, returning the previous relation.
    pub fn relabel_edge(&mut self, id: EdgeId, relation: impl Into<Relation>) -> GraphResult<Relation> {
        let edge = self
            .edges
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::EdgeNotFound(id))?;
        Ok(std::mem::replace(&mut edge.relation, relation.into()))
    }

    /// Find the lowest-id edge from `gov` to `dep`, optionally with an exact relation.
    pub fn find_edge(&self, gov: NodeId, dep: NodeId, relation: Option<&str>) -> Option<EdgeId> {
        self.outgoing(gov)
            .find(|e| e.dep == dep && relation.map_or(true, |r| e.relation == r))
            .map(|e| e.id)
    }

    // ==================== Adjacency ====================

    /// Edges leaving a node, in ascending edge id order.
    pub fn outgoing(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adj_index
            .edges_from(node_id)
            .iter()
            .filter_map(move |id| self.edge(*id))
    }

    /// Edges entering a node, in ascending edge id order.
    pub fn incoming(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adj_index
            .edges_to(node_id)
            .iter()
            .filter_map(move |id| self.edge(*id))
    }

    /// Dependents of a node, one entry per edge.
    pub fn children(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(node_id).map(|e| e.dep)
    }

    /// Governors of a node, one entry per edge.
    pub fn parents(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming(node_id).map(|e| e.gov)
    }

    /// The governor of the node's primary edge, if any.
    pub fn primary_parent(&self, node_id: NodeId) -> Option<&Edge> {
        self.incoming(node_id).find(|e| e.is_primary())
    }

    // ==================== Iteration ====================

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().map(|n| n.id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    /// Nodes in sentence order (position, then id).
    pub fn nodes_in_order(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes().collect();
        nodes.sort_by_key(|n| (n.position, n.id));
        nodes
    }

    /// Edges in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter_map(Option::as_ref)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Largest ordinary word position in the graph, or 0.
    pub fn max_word(&self) -> u32 {
        self.nodes().map(|n| n.position.word).max().unwrap_or(0)
    }

    /// The next free empty-node slot after `word`.
    pub fn next_empty_slot(&self, word: u32) -> u32 {
        self.nodes()
            .filter(|n| n.position.word == word)
            .map(|n| n.position.empty)
            .max()
            .unwrap_or(0)
            + 1
    }

    // ==================== Roots ====================

    /// Root ids in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().copied()
    }

    pub fn is_root(&self, node_id: NodeId) -> bool {
        self.roots.contains(&node_id)
    }

    pub fn add_root(&mut self, node_id: NodeId) -> GraphResult<()> {
        if !self.contains_node(node_id) {
            return Err(GraphError::NodeNotFound(node_id));
        }
        self.roots.insert(node_id);
        Ok(())
    }

    pub fn remove_root(&mut self, node_id: NodeId) -> bool {
        self.roots.remove(&node_id)
    }

    /// Replace the root set.
    pub fn set_roots(&mut self, roots: impl IntoIterator<Item = NodeId>) -> GraphResult<()> {
        let roots: BTreeSet<NodeId> = roots.into_iter().collect();
        if let Some(missing) = roots.iter().find(|id| !self.contains_node(**id)) {
            return Err(GraphError::NodeNotFound(*missing));
        }
        self.roots = roots;
        Ok(())
    }

    /// Recompute roots after structural edits: surviving roots plus every
    /// word node without an incoming primary edge. Empty nodes only carry
    /// enhanced structure and are never promoted.
    pub fn reconcile_roots(&mut self) {
        let orphans: Vec<NodeId> = self
            .nodes()
            .filter(|n| !n.position.is_empty_node() && self.primary_parent(n.id).is_none())
            .map(|n| n.id)
            .collect();
        self.roots.retain(|id| self.nodes.get(id.index()).map_or(false, Option::is_some));
        self.roots.extend(orphans);
    }

    // ==================== Closures ====================

    /// The node and everything reachable from it through primary edges.
    pub fn primary_descendants(&self, node_id: NodeId) -> BTreeSet<NodeId> {
        let mut closure = BTreeSet::new();
        if !self.contains_node(node_id) {
            return closure;
        }

        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if !closure.insert(current) {
                continue;
            }
            for edge in self.outgoing(current).filter(|e| e.is_primary()) {
                if !closure.contains(&edge.dep) {
                    stack.push(edge.dep);
                }
            }
        }
        closure
    }

    /// The leftmost node, by position, of the node's primary subtree.
    pub fn leftmost_in_subtree(&self, node_id: NodeId) -> Option<NodeId> {
        self.primary_descendants(node_id)
            .into_iter()
            .filter_map(|id| self.node(id))
            .min_by_key(|n| (n.position, n.id))
            .map(|n| n.id)
    }

    // ==================== Sentence metadata ====================

    /// Sentence comments in original order.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Multiword spans in original order.
    pub fn spans(&self) -> &[MultiwordSpan] {
        &self.spans
    }

    pub fn add_span(&mut self, span: MultiwordSpan) {
        self.spans.push(span);
    }
}
