//! Change the relation of an edge.

use super::select_edge;
use crate::{EdgeSelector, EditOutcome, NameTable, SurgeryResult};
use semgraft_core::Relation;
use semgraft_graph::Graph;

pub fn execute_relabel_edge(
    graph: &mut Graph,
    names: &NameTable,
    selector: &EdgeSelector,
    relation: &Relation,
    edit: usize,
) -> SurgeryResult<EditOutcome> {
    match select_edge(graph, names, selector, edit)? {
        Some(edge) => {
            let previous = graph.relabel_edge(edge, relation.clone())?;
            Ok(EditOutcome::EdgeRelabeled { edge, previous })
        }
        None => Ok(EditOutcome::Unchanged),
    }
}
