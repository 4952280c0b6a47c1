//! Identity types for graph entities.
//!
//! Node and edge identifiers are arena indices:
//! - Unique within the graph that allocated them
//! - Never reused after the entity is removed
//! - Preserved by a deep copy of the graph

use std::fmt;
use std::str::FromStr;

/// Stable index of a node in a graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Arena slot of this node.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Stable index of an edge in a graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Arena slot of this edge.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Sentence-order position of a node.
///
/// Ordinary tokens have `empty == 0` and print as `3`; empty (elided)
/// nodes inserted after word 3 print as `3.1`, `3.2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub word: u32,
    pub empty: u32,
}

impl Position {
    /// Position of an ordinary token.
    pub fn word(word: u32) -> Self {
        Self { word, empty: 0 }
    }

    /// Position of an empty node following `word`.
    pub fn empty(word: u32, empty: u32) -> Self {
        Self { word, empty }
    }

    /// Returns true if this is an empty-node position.
    pub fn is_empty_node(&self) -> bool {
        self.empty > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty == 0 {
            write!(f, "{}", self.word)
        } else {
            write!(f, "{}.{}", self.word, self.empty)
        }
    }
}

/// Error returned when a position string is neither `a` nor `a.b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPosition(pub String);

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid position '{}'", self.0)
    }
}

impl std::error::Error for InvalidPosition {}

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPosition(s.to_string());
        match s.split_once('.') {
            Some((word, empty)) => {
                let word = word.parse().map_err(|_| invalid())?;
                let empty: u32 = empty.parse().map_err(|_| invalid())?;
                if empty == 0 {
                    return Err(invalid());
                }
                Ok(Position::empty(word, empty))
            }
            None => Ok(Position::word(s.parse().map_err(|_| invalid())?)),
        }
    }
}
