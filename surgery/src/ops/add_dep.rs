//! Add a new node as a dependent of a named node.

use crate::{EditOutcome, NameTable, NodePlacement, SurgeryResult};
use semgraft_core::{NodeId, NodeSpec, Position, Relation};
use semgraft_graph::{Graph, DEFAULT_WEIGHT};

/// Create a node, attach it to `gov` with a primary edge, and bind `name`
/// to it when given.
#[allow(clippy::too_many_arguments)]
pub fn execute_add_dependent(
    graph: &mut Graph,
    names: &mut NameTable,
    gov: &str,
    relation: &Relation,
    spec: &NodeSpec,
    placement: NodePlacement,
    name: Option<&str>,
    edit: usize,
) -> SurgeryResult<EditOutcome> {
    let gov = names.node(graph, gov, edit)?;
    let position = place(graph, gov, placement);

    let node = graph.add_node(spec.clone().position(position));
    let edge = graph.add_edge(gov, node, relation.clone(), DEFAULT_WEIGHT, false)?;

    if let Some(name) = name {
        names.bind_node(name, node);
    }

    Ok(EditOutcome::NodeAdded {
        node,
        edge,
        position,
    })
}

/// Sentence position for a node created under `gov`.
fn place(graph: &Graph, gov: NodeId, placement: NodePlacement) -> Position {
    match placement {
        NodePlacement::End => Position::word(graph.max_word() + 1),
        NodePlacement::BeforeSubtree => {
            let leftmost = graph
                .leftmost_in_subtree(gov)
                .and_then(|id| graph.node(id))
                .map_or(1, |n| n.position.word);
            // An empty-node slot of the preceding word sorts after that
            // word and before `leftmost`.
            let anchor = leftmost.saturating_sub(1);
            Position::empty(anchor, graph.next_empty_slot(anchor))
        }
    }
}
