//! Bracketed compact text form.
//!
//! `[likes nsubj>[dog nmod:poss>My] xcomp>eating]` describes a tree: a
//! bracket opens a governor followed by `relation>dependent` pairs, and a
//! bare word is a leaf. Words may carry a tag as `word/TAG`. Several
//! top-level items separated by whitespace give several roots.

use crate::graph::{Graph, DEFAULT_WEIGHT};
use semgraft_core::{GraphError, GraphResult, NodeId, NodeSpec};
use std::collections::BTreeSet;

impl Graph {
    /// Parse the compact form. Nodes get ids from 1 in order of appearance.
    pub fn from_compact(text: &str) -> GraphResult<Self> {
        let mut parser = CompactParser {
            text,
            pos: 0,
            graph: Graph::new(),
        };
        parser.parse()?;
        Ok(parser.graph)
    }

    /// Render the graph in compact form.
    ///
    /// Dependents are ordered by position, then relation. Subtrees follow
    /// primary edges: the dependent of an extra edge is printed as a bare
    /// label unless the extra edge is its only way in. A node reached a
    /// second time is also printed bare.
    pub fn to_compact_string(&self) -> String {
        let mut used = BTreeSet::new();
        let mut items = Vec::new();
        for root in self.roots() {
            let mut out = String::new();
            self.render_node(root, &mut used, &mut out);
            items.push(out);
        }
        items.join(" ")
    }

    fn render_node(&self, node_id: NodeId, used: &mut BTreeSet<NodeId>, out: &mut String) {
        let Some(node) = self.node(node_id) else {
            return;
        };
        let first_visit = used.insert(node_id);

        let mut edges: Vec<_> = self.outgoing(node_id).collect();
        if !first_visit || edges.is_empty() {
            out.push_str(&node.label());
            return;
        }
        edges.sort_by(|a, b| {
            let pa = self.node(a.dep).map(|n| n.position);
            let pb = self.node(b.dep).map(|n| n.position);
            pa.cmp(&pb)
                .then_with(|| a.relation.cmp(&b.relation))
                .then_with(|| a.id.cmp(&b.id))
        });

        out.push('[');
        out.push_str(&node.label());
        for edge in edges {
            out.push(' ');
            out.push_str(edge.relation.as_str());
            out.push('>');
            if edge.extra && self.has_primary_home(edge.dep) {
                if let Some(dep) = self.node(edge.dep) {
                    out.push_str(&dep.label());
                }
            } else {
                self.render_node(edge.dep, used, out);
            }
        }
        out.push(']');
    }

    fn has_primary_home(&self, node_id: NodeId) -> bool {
        self.is_root(node_id) || self.primary_parent(node_id).is_some()
    }
}

struct CompactParser<'a> {
    text: &'a str,
    pos: usize,
    graph: Graph,
}

impl<'a> CompactParser<'a> {
    fn parse(&mut self) -> GraphResult<()> {
        self.skip_whitespace();
        if self.at_end() {
            return Err(GraphError::invalid_compact(self.pos, "empty graph"));
        }
        while !self.at_end() {
            let root = self.parse_item()?;
            self.graph.add_root(root)?;
            self.skip_whitespace();
        }
        Ok(())
    }

    fn parse_item(&mut self) -> GraphResult<NodeId> {
        if self.peek() != Some('[') {
            return self.parse_label();
        }
        self.pos += 1;
        self.skip_whitespace();
        let head = self.parse_label()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    return Ok(head);
                }
                None => return Err(GraphError::invalid_compact(self.pos, "unclosed '['")),
                Some(_) => {
                    let relation = self.parse_relation()?;
                    let dep = self.parse_item()?;
                    self.graph
                        .add_edge(head, dep, relation, DEFAULT_WEIGHT, false)?;
                }
            }
        }
    }

    /// `relation>` up to and including the '>'.
    fn parse_relation(&mut self) -> GraphResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '>' => break,
                '[' | ']' => {
                    return Err(GraphError::invalid_compact(self.pos, format!("unexpected '{}'", c)))
                }
                c if c.is_whitespace() => {
                    return Err(GraphError::invalid_compact(start, "expected 'relation>'"))
                }
                c => self.pos += c.len_utf8(),
            }
        }
        if self.peek() != Some('>') {
            return Err(GraphError::invalid_compact(start, "expected 'relation>'"));
        }
        let relation = &self.text[start..self.pos];
        if relation.is_empty() {
            return Err(GraphError::invalid_compact(start, "empty relation"));
        }
        self.pos += 1;
        Ok(relation.to_string())
    }

    fn parse_label(&mut self) -> GraphResult<NodeId> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '[' || c == ']' {
                break;
            }
            self.pos += c.len_utf8();
        }
        let label = &self.text[start..self.pos];
        if label.is_empty() {
            return Err(GraphError::invalid_compact(start, "expected a word"));
        }

        let spec = match label.rfind('/') {
            Some(split) if split > 0 && split + 1 < label.len() => {
                NodeSpec::new(&label[..split]).tag(&label[split + 1..])
            }
            _ => NodeSpec::new(label),
        };
        Ok(self.graph.add_node(spec))
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }
}
