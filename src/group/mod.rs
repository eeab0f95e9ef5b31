//! Group nodes: composing a subflow into one node and splicing it back.
//!
//! A group node embeds a complete [`Flow`](crate::graph::Flow) and exposes a
//! merged template whose fields carry a `proxy` back to the interior node
//! and field they stand for. [`build_group_node`] builds that surface;
//! [`ungroup_node`] and [`flatten_graph`] inline it back into the ambient
//! graph, redirecting edges through the proxies.

use crate::graph::{Graph, Node};
use crate::handle::{decode_target_handle, TargetHandle};

mod compose;
mod decompose;

pub use compose::{
    build_group_node, group_template_for_flow, merge_node_templates, update_group_template,
};
pub use decompose::{flatten_graph, ungroup_node};

/// The subflow's terminal node: the unique node with no outgoing edge.
///
/// Uniqueness is a group-creation precondition enforced by
/// [`validate_selection`](crate::validate::validate_selection); this lookup
/// simply returns the first match.
pub fn terminal_node(graph: &Graph) -> Option<&Node> {
    graph
        .nodes
        .iter()
        .find(|node| !graph.edges.iter().any(|edge| edge.source == node.id))
}

/// A source feeding one input handle, resolved through group nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedSource {
    /// Component type, or the embedded flow's name for a group source.
    pub name: String,
    /// Id of the real producing node; for a group source, the innermost
    /// terminal node.
    pub id: String,
    pub is_group: bool,
}

/// Resolves the nodes connected to one input handle of a node, drilling
/// through nested groups down to the innermost terminal node.
pub fn connected_source_nodes(
    node_id: &str,
    handle: &TargetHandle,
    graph: &Graph,
) -> Vec<ConnectedSource> {
    let mut sources = Vec::new();
    for edge in graph.edges.iter().filter(|e| e.target == node_id) {
        if !decode_target_handle(&edge.target_handle).is_ok_and(|h| h == *handle) {
            continue;
        }
        let Some(source) = graph.node(&edge.source) else {
            continue;
        };
        match &source.flow {
            Some(flow) => {
                let mut last = terminal_node(&flow.data);
                while let Some(node) = last {
                    match &node.flow {
                        Some(inner) => last = terminal_node(&inner.data),
                        None => break,
                    }
                }
                if let Some(last) = last {
                    sources.push(ConnectedSource {
                        name: flow.name.clone(),
                        id: last.id.clone(),
                        is_group: true,
                    });
                }
            }
            None => sources.push(ConnectedSource {
                name: source.node_type.clone(),
                id: source.id.clone(),
                is_group: false,
            }),
        }
    }
    sources
}
