//! Add an edge between two named nodes.

use crate::{EditOutcome, NameTable, SurgeryResult};
use semgraft_core::Relation;
use semgraft_graph::Graph;

/// Add an edge unless one with the same governor, dependent and relation
/// already exists.
#[allow(clippy::too_many_arguments)]
pub fn execute_add_edge(
    graph: &mut Graph,
    names: &NameTable,
    gov: &str,
    dep: &str,
    relation: &Relation,
    weight: f64,
    extra: bool,
    edit: usize,
) -> SurgeryResult<EditOutcome> {
    let gov = names.node(graph, gov, edit)?;
    let dep = names.node(graph, dep, edit)?;

    if let Some(existing) = graph.find_edge(gov, dep, Some(relation.as_str())) {
        return Ok(EditOutcome::EdgeExists(existing));
    }

    let id = graph.add_edge(gov, dep, relation.clone(), weight, extra)?;
    Ok(EditOutcome::EdgeAdded(id))
}
