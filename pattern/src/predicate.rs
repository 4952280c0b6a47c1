//! Node predicates and relation label filters.

use crate::{CompileError, CompileResult, PatternConfig};
use regex_lite::Regex;
use semgraft_core::{Node, Relation};
use semgraft_graph::Graph;
use semgraft_parser::{AttrConstraint, ValueLiteral};

/// A compiled literal.
#[derive(Debug, Clone)]
pub enum ValueMatcher {
    Exact(String),
    /// Exact comparison on lowercased text; holds the lowercased literal.
    Folded(String),
    /// Anchored regex: the whole value must match.
    Regex(Regex),
}

impl ValueMatcher {
    pub fn compile(literal: &ValueLiteral, ignore_case: bool) -> CompileResult<Self> {
        match literal {
            ValueLiteral::Exact(s) if ignore_case => Ok(ValueMatcher::Folded(s.to_lowercase())),
            ValueLiteral::Exact(s) => Ok(ValueMatcher::Exact(s.clone())),
            ValueLiteral::Regex(source) => {
                let flags = if ignore_case { "(?i)" } else { "" };
                let anchored = format!("{}^(?:{})$", flags, source);
                Regex::new(&anchored)
                    .map(ValueMatcher::Regex)
                    .map_err(|e| CompileError::invalid_regex(source, e.to_string()))
            }
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            ValueMatcher::Exact(s) => s == value,
            ValueMatcher::Folded(s) => *s == value.to_lowercase(),
            ValueMatcher::Regex(re) => re.is_match(value),
        }
    }
}

/// One attribute test: the attribute must (or must not) match one of the
/// alternatives.
#[derive(Debug, Clone)]
struct AttrTest {
    key: String,
    negated: bool,
    alternatives: Vec<ValueMatcher>,
}

impl AttrTest {
    fn accepts(&self, node: &Node) -> bool {
        match node.get_attr(&self.key) {
            Some(value) => self.alternatives.iter().any(|m| m.is_match(value)) != self.negated,
            None => self.negated,
        }
    }
}

/// Everything a node must satisfy to fill one pattern position.
#[derive(Debug, Clone, Default)]
pub struct NodePredicate {
    tests: Vec<AttrTest>,
    root_only: bool,
}

impl NodePredicate {
    /// Compile a node description. Positive constraints on the same key
    /// are merged into one set of alternatives; negative ones each stand
    /// alone.
    pub fn compile(
        constraints: &[AttrConstraint],
        root_only: bool,
        config: &PatternConfig,
    ) -> CompileResult<Self> {
        let mut tests: Vec<AttrTest> = Vec::new();
        for constraint in constraints {
            let alternatives = constraint
                .values
                .iter()
                .map(|v| ValueMatcher::compile(v, config.ignore_case))
                .collect::<CompileResult<Vec<_>>>()?;

            let existing = tests
                .iter_mut()
                .find(|t| !constraint.negated && !t.negated && t.key == constraint.key);
            match existing {
                Some(test) => test.alternatives.extend(alternatives),
                None => tests.push(AttrTest {
                    key: constraint.key.clone(),
                    negated: constraint.negated,
                    alternatives,
                }),
            }
        }
        Ok(Self { tests, root_only })
    }

    pub fn accepts(&self, graph: &Graph, node: &Node) -> bool {
        if self.root_only && !graph.is_root(node.id) {
            return false;
        }
        self.tests.iter().all(|t| t.accepts(node))
    }
}

/// Relation label alternatives; empty accepts every relation.
#[derive(Debug, Clone, Default)]
pub struct LabelFilter {
    alternatives: Vec<ValueMatcher>,
    hierarchy: bool,
}

impl LabelFilter {
    pub fn compile(labels: &[ValueLiteral], config: &PatternConfig) -> CompileResult<Self> {
        let alternatives = labels
            .iter()
            .map(|v| ValueMatcher::compile(v, false))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Self {
            alternatives,
            hierarchy: config.relation_hierarchy,
        })
    }

    pub fn accepts(&self, relation: &Relation) -> bool {
        if self.alternatives.is_empty() {
            return true;
        }
        self.alternatives.iter().any(|m| match m {
            ValueMatcher::Exact(name) if self.hierarchy => relation.is_subsumed_by(name),
            other => other.is_match(relation.as_str()),
        })
    }
}
