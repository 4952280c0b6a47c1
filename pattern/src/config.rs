//! Pattern compilation options.

/// Options fixed into a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternConfig {
    /// Compare exact attribute values and regexes without regard to case.
    pub ignore_case: bool,
    /// Let a relation label filter accept more specific relations:
    /// `dep` accepts everything and `nsubj` accepts `nsubj:pass`.
    pub relation_hierarchy: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            ignore_case: false,
            relation_hierarchy: true,
        }
    }
}

impl PatternConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_relation_hierarchy(mut self, relation_hierarchy: bool) -> Self {
        self.relation_hierarchy = relation_hierarchy;
        self
    }
}
