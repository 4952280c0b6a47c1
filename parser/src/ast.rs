//! Abstract syntax tree for pattern text.

use std::fmt;

/// Source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ==================== PATTERN EXPRESSIONS ====================

/// A node term followed by relations that all attach to its head node.
///
/// `{}=A >nsubj {}=B >obj {}=C` has head `A` and two relations.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub head: NodeTerm,
    pub relations: Vec<RelationExpr>,
    pub span: Span,
}

/// Either a node description or a parenthesised sub-expression. A group
/// stands for its own head node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTerm {
    Node(NodeDesc),
    Group(Box<Expr>),
}

impl NodeTerm {
    /// The node description this term resolves to.
    pub fn head(&self) -> &NodeDesc {
        match self {
            NodeTerm::Node(desc) => desc,
            NodeTerm::Group(expr) => expr.head.head(),
        }
    }
}

/// `{key:value;...}=name`
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    pub constraints: Vec<AttrConstraint>,
    /// `{$}`: the node must be a root.
    pub root_only: bool,
    pub name: Option<String>,
    pub span: Span,
}

impl NodeDesc {
    /// Returns true for `{}`, which places no restriction on the node.
    pub fn is_blank(&self) -> bool {
        self.constraints.is_empty() && !self.root_only
    }
}

/// One `key:value|value` item inside a node description.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrConstraint {
    pub key: String,
    /// `key:!value`: the attribute must not match.
    pub negated: bool,
    /// Alternatives; any one may match.
    pub values: Vec<ValueLiteral>,
    pub span: Span,
}

/// A literal compared against an attribute or relation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueLiteral {
    Exact(String),
    Regex(String),
}

impl fmt::Display for ValueLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueLiteral::Exact(s) => write!(f, "{}", s),
            ValueLiteral::Regex(s) => write!(f, "/{}/", s),
        }
    }
}

// ==================== RELATIONS ====================

/// Relation operator, read from the point of view of the left-hand node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// `A > B`: B is a dependent of A.
    Child,
    /// `A < B`: B is a governor of A.
    Parent,
    /// `A >> B`: B is reachable from A following edges forward.
    Descendant,
    /// `A << B`: A is reachable from B following edges forward.
    Ancestor,
}

impl RelOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            RelOp::Child => ">",
            RelOp::Parent => "<",
            RelOp::Descendant => ">>",
            RelOp::Ancestor => "<<",
        }
    }

    /// Returns true if the operator walks edges from governor to dependent.
    pub fn is_downward(&self) -> bool {
        matches!(self, RelOp::Child | RelOp::Descendant)
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `!>label=name target`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationExpr {
    /// `!>`: no such relation may exist.
    pub negated: bool,
    pub op: RelOp,
    /// Relation label alternatives; empty means any relation.
    pub labels: Vec<ValueLiteral>,
    /// Edge capture name.
    pub name: Option<String>,
    pub target: NodeTerm,
    pub span: Span,
}
