//! Remove one edge.

use super::select_edge;
use crate::{EdgeSelector, EditOutcome, NameTable, SurgeryResult};
use semgraft_graph::Graph;

/// Remove the selected edge. Removing an edge that does not exist between
/// two named nodes leaves the graph unchanged.
pub fn execute_remove_edge(
    graph: &mut Graph,
    names: &NameTable,
    selector: &EdgeSelector,
    edit: usize,
) -> SurgeryResult<EditOutcome> {
    match select_edge(graph, names, selector, edit)? {
        Some(id) => {
            graph.remove_edge(id)?;
            Ok(EditOutcome::EdgeRemoved(id))
        }
        None => Ok(EditOutcome::Unchanged),
    }
}
