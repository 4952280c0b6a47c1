//! Surgery options.

use crate::NodePlacement;

/// Options applied to every derivation of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurgeryConfig {
    /// Recompute roots after the edit list runs: surviving roots plus
    /// every word node left without a primary governor.
    pub reconcile_roots: bool,
    /// Placement of nodes created by edits that do not choose one.
    pub placement: NodePlacement,
}

impl Default for SurgeryConfig {
    fn default() -> Self {
        Self {
            reconcile_roots: true,
            placement: NodePlacement::BeforeSubtree,
        }
    }
}

impl SurgeryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reconcile_roots(mut self, reconcile_roots: bool) -> Self {
        self.reconcile_roots = reconcile_roots;
        self
    }

    pub fn with_placement(mut self, placement: NodePlacement) -> Self {
        self.placement = placement;
        self
    }
}
