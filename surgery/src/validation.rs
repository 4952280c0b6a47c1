//! Construction-time checks of edit references.

use crate::{EditOp, SurgeryError, SurgeryResult};
use semgraft_pattern::CompiledPattern;
use std::collections::BTreeSet;

/// Check that every name an edit reads is bound by the pattern or by an
/// earlier edit, and that introduced names do not shadow anything.
pub fn validate_edits(pattern: &CompiledPattern, edits: &[EditOp]) -> SurgeryResult<()> {
    let mut nodes: BTreeSet<&str> = pattern.node_names().collect();
    let edges: BTreeSet<&str> = pattern.edge_names().collect();

    for (index, edit) in edits.iter().enumerate() {
        if let Some(name) = edit.node_references().into_iter().find(|n| !nodes.contains(n)) {
            return Err(SurgeryError::unknown_reference(name, index));
        }
        if let Some(name) = edit.edge_references().into_iter().find(|n| !edges.contains(n)) {
            return Err(SurgeryError::unknown_reference(name, index));
        }
        if let Some(name) = edit.introduces() {
            if nodes.contains(name) || edges.contains(name) {
                return Err(SurgeryError::duplicate_name(name, index));
            }
            nodes.insert(name);
        }
    }
    Ok(())
}
