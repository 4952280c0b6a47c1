//! Edit operation implementations.
//!
//! Each edit kind is implemented in its own module. Every `execute_*`
//! function works on one graph copy and the names of one match.

mod add_dep;
mod add_edge;
mod delete;
mod relabel;
mod remove_edge;

pub use add_dep::execute_add_dependent;
pub use add_edge::execute_add_edge;
pub use delete::execute_delete_subgraph;
pub use relabel::execute_relabel_edge;
pub use remove_edge::execute_remove_edge;

use crate::{EdgeSelector, NameTable, SurgeryResult};
use semgraft_core::EdgeId;
use semgraft_graph::Graph;

/// Resolve a selector to a live edge. `Between` selectors resolve to
/// `None` when the nodes are not connected.
fn select_edge(
    graph: &Graph,
    names: &NameTable,
    selector: &EdgeSelector,
    edit: usize,
) -> SurgeryResult<Option<EdgeId>> {
    match selector {
        EdgeSelector::Named(name) => names.edge(graph, name, edit).map(Some),
        EdgeSelector::Between { gov, dep, relation } => {
            let gov = names.node(graph, gov, edit)?;
            let dep = names.node(graph, dep, edit)?;
            Ok(graph.find_edge(gov, dep, relation.as_ref().map(|r| r.as_str())))
        }
    }
}
