//! Entity structures.
//!
//! Nodes (word tokens) and edges (labeled dependencies) are the two
//! fundamental entity types of a dependency graph.

use crate::{Attributes, EdgeId, NodeId, Position, Relation};

/// Attribute keys that address node fields instead of the attribute map.
pub const WORD_KEY: &str = "word";
pub const LEMMA_KEY: &str = "lemma";
pub const TAG_KEY: &str = "tag";
pub const POS_KEY: &str = "pos";

/// A word token in a dependency graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable arena index.
    pub id: NodeId,
    /// Sentence-order position.
    pub position: Position,
    /// Surface form.
    pub word: String,
    pub lemma: Option<String>,
    /// Language-specific part-of-speech tag.
    pub tag: Option<String>,
    /// Further attributes (upos, feats, ner, ...).
    pub attributes: Attributes,
    /// Surface text of the multiword token this node belongs to, or empty.
    pub original_text: String,
    /// Source line the node was read from.
    pub line: Option<usize>,
}

impl Node {
    /// Materialize a node from a spec.
    pub fn from_spec(id: NodeId, position: Position, spec: NodeSpec) -> Self {
        Self {
            id,
            position,
            word: spec.word,
            lemma: spec.lemma,
            tag: spec.tag,
            attributes: spec.attributes,
            original_text: spec.original_text,
            line: spec.line,
        }
    }

    /// Get an attribute value by key. `word`, `lemma`, `tag` and `pos`
    /// address the corresponding fields.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        match key {
            WORD_KEY => Some(&self.word),
            LEMMA_KEY => self.lemma.as_deref(),
            TAG_KEY | POS_KEY => self.tag.as_deref(),
            _ => self.attributes.get(key).map(String::as_str),
        }
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            WORD_KEY => self.word = value,
            LEMMA_KEY => self.lemma = Some(value),
            TAG_KEY | POS_KEY => self.tag = Some(value),
            _ => {
                self.attributes.insert(key.to_string(), value);
            }
        }
    }

    /// Remove an attribute. The surface form cannot be removed.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        match key {
            WORD_KEY => None,
            LEMMA_KEY => self.lemma.take(),
            TAG_KEY | POS_KEY => self.tag.take(),
            _ => self.attributes.remove(key),
        }
    }

    /// `word` or `word/TAG` when a tag is present.
    pub fn label(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{}/{}", self.word, tag),
            None => self.word.clone(),
        }
    }
}

/// Description of a node to be created. The graph assigns the id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSpec {
    pub word: String,
    pub lemma: Option<String>,
    pub tag: Option<String>,
    pub attributes: Attributes,
    pub original_text: String,
    /// Explicit position; defaults to the word position equal to the new id.
    pub position: Option<Position>,
    pub line: Option<usize>,
}

impl NodeSpec {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    pub fn lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = text.into();
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A labeled, directed dependency from a governor to a dependent.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Stable arena index.
    pub id: EdgeId,
    pub gov: NodeId,
    pub dep: NodeId,
    pub relation: Relation,
    pub weight: f64,
    /// True for secondary (enhanced) edges, false for the tree-forming edge.
    pub extra: bool,
}

impl Edge {
    pub fn new(
        id: EdgeId,
        gov: NodeId,
        dep: NodeId,
        relation: Relation,
        weight: f64,
        extra: bool,
    ) -> Self {
        Self {
            id,
            gov,
            dep,
            relation,
            weight,
            extra,
        }
    }

    /// Returns true for a tree-forming edge.
    pub fn is_primary(&self) -> bool {
        !self.extra
    }

    /// Returns true if this edge runs from `gov` to `dep`.
    pub fn connects(&self, gov: NodeId, dep: NodeId) -> bool {
        self.gov == gov && self.dep == dep
    }

    /// Returns true if the node is either endpoint.
    pub fn involves(&self, node_id: NodeId) -> bool {
        self.gov == node_id || self.dep == node_id
    }
}
