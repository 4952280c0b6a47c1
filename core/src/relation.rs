//! Dependency relation labels.
//!
//! Relations form a shallow hierarchy: `dep` is the most general relation
//! and subsumes every other label, and a subtyped label such as
//! `nsubj:pass` is subsumed by its base `nsubj`.

use std::fmt;

/// A dependency relation label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Relation(String);

impl Relation {
    /// The most general relation.
    pub const GENERIC: &'static str = "dep";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The label without its subtype (`nsubj` for `nsubj:pass`).
    pub fn base(&self) -> &str {
        match self.0.split_once(':') {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    /// The subtype, if any (`pass` for `nsubj:pass`).
    pub fn subtype(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, sub)| sub)
    }

    /// Returns true if `general` names this relation or one of its ancestors.
    pub fn is_subsumed_by(&self, general: &str) -> bool {
        let name = self.as_str();
        if name == general || general == Self::GENERIC {
            return true;
        }
        name.len() > general.len()
            && name.starts_with(general)
            && name.as_bytes()[general.len()] == b':'
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Relation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Relation {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Relation {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Relation {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Relation {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
