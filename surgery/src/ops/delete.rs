//! Delete a node together with its primary-edge subtree.

use crate::{EditOutcome, NameTable, SurgeryResult};
use semgraft_graph::Graph;

/// Remove the named node and every node reachable from it through primary
/// edges, with all edges touching them. Nodes that other governors still
/// reach through extra edges are removed as well.
pub fn execute_delete_subgraph(
    graph: &mut Graph,
    names: &NameTable,
    node: &str,
    edit: usize,
) -> SurgeryResult<EditOutcome> {
    let node = names.node(graph, node, edit)?;
    let closure = graph.primary_descendants(node);

    let edges_before = graph.edge_count();
    for id in &closure {
        graph.remove_node(*id)?;
    }

    Ok(EditOutcome::SubgraphDeleted {
        nodes: closure.into_iter().collect(),
        edges: edges_before - graph.edge_count(),
    })
}
