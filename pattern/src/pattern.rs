//! Compiled pattern representation.

use crate::{CaptureRole, CompileError, CompileResult, LabelFilter, NodePredicate, PatternConfig};
use semgraft_core::{DiagnosticSink, NullSink, Stage};
use semgraft_parser::{parse_pattern, AttrConstraint, Expr, NodeDesc, NodeTerm, RelOp, RelationExpr};
use std::collections::BTreeMap;

/// A compiled pattern operation. Operations run in order; each one binds
/// at most one node slot and one edge slot.
#[derive(Debug, Clone)]
pub enum PatternOp {
    /// Bind a node slot to any node satisfying its predicate.
    Scan { slot: usize },
    /// Bind (or check) `to` through a relation starting at bound `from`.
    Relate {
        from: usize,
        op: RelOp,
        labels: LabelFilter,
        edge_slot: Option<usize>,
        to: usize,
    },
    /// Succeed only if the nested operations cannot be satisfied.
    Absent { ops: Vec<PatternOp> },
}

/// A compiled pattern ready for matching.
///
/// Holds no references into any graph; it can be cached, cloned and shared
/// between threads matching different graphs.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    text: String,
    /// Operations to execute in order.
    ops: Vec<PatternOp>,
    /// Predicate per node slot.
    predicates: Vec<NodePredicate>,
    edge_slots: usize,
    /// Exported node captures.
    node_names: BTreeMap<String, usize>,
    /// Exported edge captures.
    edge_names: BTreeMap<String, usize>,
    config: PatternConfig,
}

impl CompiledPattern {
    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ops(&self) -> &[PatternOp] {
        &self.ops
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub(crate) fn predicate(&self, slot: usize) -> &NodePredicate {
        &self.predicates[slot]
    }

    pub fn node_slot_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn edge_slot_count(&self) -> usize {
        self.edge_slots
    }

    /// Exported node capture names with their slots.
    pub(crate) fn node_captures(&self) -> impl Iterator<Item = (&str, usize)> {
        self.node_names.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Exported edge capture names with their slots.
    pub(crate) fn edge_captures(&self) -> impl Iterator<Item = (&str, usize)> {
        self.edge_names.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Node capture names, sorted.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.node_names.keys().map(String::as_str)
    }

    /// Edge capture names, sorted.
    pub fn edge_names(&self) -> impl Iterator<Item = &str> {
        self.edge_names.keys().map(String::as_str)
    }

    pub fn binds_node(&self, name: &str) -> bool {
        self.node_names.contains_key(name)
    }

    pub fn binds_edge(&self, name: &str) -> bool {
        self.edge_names.contains_key(name)
    }

    /// Check if a name will be bound by every match of this pattern.
    pub fn binds(&self, name: &str) -> bool {
        self.binds_node(name) || self.binds_edge(name)
    }
}

/// Compile pattern text with default options.
pub fn compile(text: &str) -> CompileResult<CompiledPattern> {
    compile_with(text, PatternConfig::default(), &mut NullSink)
}

/// Compile pattern text.
pub fn compile_with(
    text: &str,
    config: PatternConfig,
    sink: &mut dyn DiagnosticSink,
) -> CompileResult<CompiledPattern> {
    let expr = parse_pattern(text)?;

    let mut compiler = Compiler::new(config);
    let mut ops = Vec::new();
    compiler.compile_root(&expr, &mut ops)?;

    let pattern = CompiledPattern {
        text: text.to_string(),
        ops,
        predicates: compiler.predicates,
        edge_slots: compiler.edge_slots,
        node_names: compiler.scope.nodes.into_iter().map(|(k, v)| (k, v.slot)).collect(),
        edge_names: compiler.scope.edges,
        config,
    };
    sink.debug(Stage::Compile, || {
        format!(
            "compiled '{}': {} node slots, {} edge slots, {} ops",
            pattern.text,
            pattern.node_slot_count(),
            pattern.edge_slot_count(),
            pattern.ops.len()
        )
    });
    Ok(pattern)
}

/// A named node seen so far and the constraints it was first described with.
#[derive(Debug, Clone)]
struct NamedNode {
    slot: usize,
    constraints: Vec<(String, bool, Vec<String>)>,
    root_only: bool,
}

/// Names visible at the current point of compilation.
#[derive(Debug, Clone, Default)]
struct Scope {
    nodes: BTreeMap<String, NamedNode>,
    edges: BTreeMap<String, usize>,
}

struct Compiler {
    config: PatternConfig,
    predicates: Vec<NodePredicate>,
    edge_slots: usize,
    scope: Scope,
}

impl Compiler {
    fn new(config: PatternConfig) -> Self {
        Self {
            config,
            predicates: Vec::new(),
            edge_slots: 0,
            scope: Scope::default(),
        }
    }

    fn compile_root(&mut self, expr: &Expr, ops: &mut Vec<PatternOp>) -> CompileResult<()> {
        let slot = self.node_slot(expr.head.head())?;
        ops.push(PatternOp::Scan { slot });
        self.compile_term_relations(&expr.head, slot, ops)?;
        self.compile_relations(slot, &expr.relations, ops)
    }

    /// Relations inside a (possibly nested) group whose head is `slot`.
    fn compile_term_relations(
        &mut self,
        term: &NodeTerm,
        slot: usize,
        ops: &mut Vec<PatternOp>,
    ) -> CompileResult<()> {
        if let NodeTerm::Group(inner) = term {
            self.compile_term_relations(&inner.head, slot, ops)?;
            self.compile_relations(slot, &inner.relations, ops)?;
        }
        Ok(())
    }

    fn compile_relations(
        &mut self,
        from: usize,
        relations: &[RelationExpr],
        ops: &mut Vec<PatternOp>,
    ) -> CompileResult<()> {
        for relation in relations {
            if relation.negated {
                // Names introduced under a negation are local to it.
                let saved = self.scope.clone();
                let mut nested = Vec::new();
                self.compile_relation(from, relation, &mut nested)?;
                self.scope = saved;
                ops.push(PatternOp::Absent { ops: nested });
            } else {
                self.compile_relation(from, relation, ops)?;
            }
        }
        Ok(())
    }

    fn compile_relation(
        &mut self,
        from: usize,
        relation: &RelationExpr,
        ops: &mut Vec<PatternOp>,
    ) -> CompileResult<()> {
        let labels = LabelFilter::compile(&relation.labels, &self.config)?;
        let edge_slot = match &relation.name {
            Some(name) => Some(self.edge_slot(name)?),
            None => None,
        };
        let to = self.node_slot(relation.target.head())?;

        ops.push(PatternOp::Relate {
            from,
            op: relation.op,
            labels,
            edge_slot,
            to,
        });
        self.compile_term_relations(&relation.target, to, ops)
    }

    /// Resolve a node description to a slot, allocating one unless it is a
    /// backreference to an earlier named node.
    fn node_slot(&mut self, desc: &NodeDesc) -> CompileResult<usize> {
        let Some(name) = &desc.name else {
            return self.new_node_slot(desc);
        };
        if self.scope.edges.contains_key(name) {
            return Err(CompileError::capture_role_conflict(
                name,
                CaptureRole::Edge,
                CaptureRole::Node,
            ));
        }

        if let Some(existing) = self.scope.nodes.get(name) {
            let same = existing.root_only == desc.root_only
                && existing.constraints == constraint_key(&desc.constraints);
            if desc.is_blank() || same {
                return Ok(existing.slot);
            }
            return Err(CompileError::conflicting_constraints(name));
        }

        let slot = self.new_node_slot(desc)?;
        self.scope.nodes.insert(
            name.clone(),
            NamedNode {
                slot,
                constraints: constraint_key(&desc.constraints),
                root_only: desc.root_only,
            },
        );
        Ok(slot)
    }

    fn new_node_slot(&mut self, desc: &NodeDesc) -> CompileResult<usize> {
        let predicate = NodePredicate::compile(&desc.constraints, desc.root_only, &self.config)?;
        self.predicates.push(predicate);
        Ok(self.predicates.len() - 1)
    }

    fn edge_slot(&mut self, name: &str) -> CompileResult<usize> {
        if self.scope.nodes.contains_key(name) {
            return Err(CompileError::capture_role_conflict(
                name,
                CaptureRole::Node,
                CaptureRole::Edge,
            ));
        }
        if self.scope.edges.contains_key(name) {
            return Err(CompileError::duplicate_edge_capture(name));
        }
        let slot = self.edge_slots;
        self.edge_slots += 1;
        self.scope.edges.insert(name.to_string(), slot);
        Ok(slot)
    }
}

/// Span-free form of a description's constraints, for comparing
/// repeated descriptions of one named node.
fn constraint_key(constraints: &[AttrConstraint]) -> Vec<(String, bool, Vec<String>)> {
    constraints
        .iter()
        .map(|c| {
            (
                c.key.clone(),
                c.negated,
                c.values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}
