//! Pattern matching against the graph.
//!
//! The search runs the compiled operations depth first. Each operation
//! gets a frame holding its candidate list; advancing a frame undoes the
//! binding of the previous candidate, and an exhausted frame is popped.
//! Matches are produced one at a time, so callers that stop early never
//! pay for the rest of the search.

use crate::{CompiledPattern, LabelFilter, Match, PatternOp};
use semgraft_core::{DiagnosticSink, Edge, EdgeId, NodeId, Stage};
use semgraft_graph::Graph;
use semgraft_parser::RelOp;
use std::collections::{BTreeMap, BTreeSet};

/// Pattern matcher over one graph.
pub struct Matcher<'p, 'g> {
    pattern: &'p CompiledPattern,
    graph: &'g Graph,
}

impl<'p, 'g> Matcher<'p, 'g> {
    /// Create a new matcher.
    pub fn new(pattern: &'p CompiledPattern, graph: &'g Graph) -> Self {
        Self { pattern, graph }
    }

    /// Enumerate matches lazily. Every call starts a fresh enumeration.
    pub fn matches(&self) -> Matches<'p, 'g, 'static> {
        Matches {
            search: Search::new(self.pattern, self.graph, self.pattern.ops()),
            sink: None,
            produced: 0,
            finished: false,
        }
    }

    /// Enumerate matches lazily, reporting to a diagnostic sink.
    pub fn matches_with<'s>(&self, sink: &'s mut dyn DiagnosticSink) -> Matches<'p, 'g, 's> {
        Matches {
            search: Search::new(self.pattern, self.graph, self.pattern.ops()),
            sink: Some(sink),
            produced: 0,
            finished: false,
        }
    }

    /// Find all matches of the pattern.
    pub fn find_all(&self) -> Vec<Match> {
        self.matches().collect()
    }

    /// Check if any match exists.
    pub fn exists(&self) -> bool {
        self.matches().next().is_some()
    }
}

impl CompiledPattern {
    /// Enumerate matches against a graph.
    pub fn matches<'p, 'g>(&'p self, graph: &'g Graph) -> Matches<'p, 'g, 'static> {
        Matcher::new(self, graph).matches()
    }
}

/// Lazy sequence of matches.
pub struct Matches<'p, 'g, 's> {
    search: Search<'p, 'g>,
    sink: Option<&'s mut dyn DiagnosticSink>,
    produced: usize,
    finished: bool,
}

impl<'p, 'g, 's> Iterator for Matches<'p, 'g, 's> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.finished {
            return None;
        }

        let pattern: &'p CompiledPattern = self.search.pattern;
        let text = pattern.text();
        if self.search.next_solution() {
            let found = self.search.snapshot();
            self.produced += 1;
            let index = self.produced;
            if let Some(sink) = self.sink.as_deref_mut() {
                sink.debug(Stage::Match, || format!("match {} of '{}': {}", index, text, found));
            }
            Some(found)
        } else {
            self.finished = true;
            let produced = self.produced;
            if let Some(sink) = self.sink.as_deref_mut() {
                sink.info(Stage::Match, || format!("'{}' produced {} matches", text, produced));
            }
            None
        }
    }
}

/// One candidate for a frame: the node and edge it would bind.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: Option<NodeId>,
    edge: Option<EdgeId>,
}

impl Candidate {
    const CHECK: Candidate = Candidate {
        node: None,
        edge: None,
    };
}

#[derive(Debug)]
struct Frame {
    candidates: Vec<Candidate>,
    next: usize,
    /// Slot this frame binds, if it binds one.
    node_slot: Option<usize>,
    edge_slot: Option<usize>,
}

impl Frame {
    fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            next: 0,
            node_slot: None,
            edge_slot: None,
        }
    }

    fn check(passed: bool) -> Self {
        Self {
            candidates: if passed { vec![Candidate::CHECK] } else { Vec::new() },
            ..Self::empty()
        }
    }
}

/// Backtracking search state over a list of operations.
struct Search<'p, 'g> {
    pattern: &'p CompiledPattern,
    graph: &'g Graph,
    ops: &'p [PatternOp],
    nodes: Vec<Option<NodeId>>,
    edges: Vec<Option<EdgeId>>,
    stack: Vec<Frame>,
    started: bool,
}

impl<'p, 'g> Search<'p, 'g> {
    fn new(pattern: &'p CompiledPattern, graph: &'g Graph, ops: &'p [PatternOp]) -> Self {
        Self {
            pattern,
            graph,
            ops,
            nodes: vec![None; pattern.node_slot_count()],
            edges: vec![None; pattern.edge_slot_count()],
            stack: Vec::new(),
            started: false,
        }
    }

    /// A search over nested operations that starts from the current bindings.
    fn nested(&self, ops: &'p [PatternOp]) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            ..Self::new(self.pattern, self.graph, ops)
        }
    }

    /// Advance to the next complete assignment. Bindings hold it on success.
    fn next_solution(&mut self) -> bool {
        if !self.started {
            self.started = true;
            if self.ops.is_empty() {
                return true;
            }
            let frame = self.frame_for(0);
            self.stack.push(frame);
        }

        while let Some(depth) = self.stack.len().checked_sub(1) {
            self.undo(depth);

            let frame = &mut self.stack[depth];
            let Some(candidate) = frame.candidates.get(frame.next).copied() else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;
            self.bind(depth, candidate);

            if depth + 1 == self.ops.len() {
                return true;
            }
            let frame = self.frame_for(depth + 1);
            self.stack.push(frame);
        }
        false
    }

    fn undo(&mut self, depth: usize) {
        let frame = &self.stack[depth];
        if let Some(slot) = frame.node_slot {
            self.nodes[slot] = None;
        }
        if let Some(slot) = frame.edge_slot {
            self.edges[slot] = None;
        }
    }

    fn bind(&mut self, depth: usize, candidate: Candidate) {
        let frame = &self.stack[depth];
        if let Some(slot) = frame.node_slot {
            self.nodes[slot] = candidate.node;
        }
        if let Some(slot) = frame.edge_slot {
            self.edges[slot] = candidate.edge;
        }
    }

    /// Exported captures of the current assignment.
    fn snapshot(&self) -> Match {
        let mut found = Match::new();
        for (name, slot) in self.pattern.node_captures() {
            if let Some(id) = self.nodes[slot] {
                found.insert_node(name, id);
            }
        }
        for (name, slot) in self.pattern.edge_captures() {
            if let Some(id) = self.edges[slot] {
                found.insert_edge(name, id);
            }
        }
        found
    }

    fn frame_for(&self, index: usize) -> Frame {
        let ops: &'p [PatternOp] = self.ops;
        match &ops[index] {
            PatternOp::Scan { slot } => {
                if let Some(bound) = self.nodes[*slot] {
                    return Frame::check(self.graph.contains_node(bound));
                }
                let predicate = self.pattern.predicate(*slot);
                let candidates = self
                    .graph
                    .nodes()
                    .filter(|n| predicate.accepts(self.graph, n))
                    .map(|n| Candidate {
                        node: Some(n.id),
                        edge: None,
                    })
                    .collect();
                Frame {
                    candidates,
                    next: 0,
                    node_slot: Some(*slot),
                    edge_slot: None,
                }
            }

            PatternOp::Relate {
                from,
                op,
                labels,
                edge_slot,
                to,
            } => {
                let Some(source) = self.nodes[*from] else {
                    return Frame::empty();
                };
                let mut related = self.related(source, *op, labels);

                let node_slot = match self.nodes[*to] {
                    Some(bound) => {
                        related.retain(|(node, _)| *node == bound);
                        None
                    }
                    None => {
                        let predicate = self.pattern.predicate(*to);
                        related.retain(|(node, _)| {
                            self.graph
                                .node(*node)
                                .map_or(false, |n| predicate.accepts(self.graph, n))
                        });
                        Some(*to)
                    }
                };
                // Without an edge capture, parallel edges to one node are one match.
                if edge_slot.is_none() {
                    related.dedup_by_key(|(node, _)| *node);
                }

                Frame {
                    candidates: related
                        .into_iter()
                        .map(|(node, edge)| Candidate {
                            node: Some(node),
                            edge: Some(edge),
                        })
                        .collect(),
                    next: 0,
                    node_slot,
                    edge_slot: *edge_slot,
                }
            }

            PatternOp::Absent { ops } => {
                let mut nested = self.nested(ops);
                Frame::check(!nested.next_solution())
            }
        }
    }

    /// Nodes related to `source` by the operator, each with the edge that
    /// realizes the relation, sorted by node then edge.
    fn related(&self, source: NodeId, op: RelOp, labels: &LabelFilter) -> Vec<(NodeId, EdgeId)> {
        let mut related: Vec<(NodeId, EdgeId)> = match op {
            RelOp::Child => self
                .graph
                .outgoing(source)
                .filter(|e| labels.accepts(&e.relation))
                .map(|e| (e.dep, e.id))
                .collect(),
            RelOp::Parent => self
                .graph
                .incoming(source)
                .filter(|e| labels.accepts(&e.relation))
                .map(|e| (e.gov, e.id))
                .collect(),
            RelOp::Descendant | RelOp::Ancestor => {
                self.transitive(source, op.is_downward(), labels)
            }
        };
        related.sort();
        related
    }

    /// Walk edges away from `source` in one direction. The label filter
    /// applies to the edge touching each far node; the walk itself follows
    /// every edge. A visited set keeps cyclic graphs finite, and each far
    /// node is reported once with the first qualifying edge found.
    fn transitive(
        &self,
        source: NodeId,
        downward: bool,
        labels: &LabelFilter,
    ) -> Vec<(NodeId, EdgeId)> {
        let mut visited = BTreeSet::from([source]);
        let mut found: BTreeMap<NodeId, EdgeId> = BTreeMap::new();
        let mut stack = vec![source];

        while let Some(current) = stack.pop() {
            for (far, edge) in self.step(current, downward) {
                if far != source && labels.accepts(&edge.relation) {
                    found.entry(far).or_insert(edge.id);
                }
                if visited.insert(far) {
                    stack.push(far);
                }
            }
        }
        found.into_iter().collect()
    }

    fn step(&self, node: NodeId, downward: bool) -> Vec<(NodeId, &'g Edge)> {
        let graph: &'g Graph = self.graph;
        if downward {
            graph.outgoing(node).map(|e| (e.dep, e)).collect()
        } else {
            graph.incoming(node).map(|e| (e.gov, e)).collect()
        }
    }
}
