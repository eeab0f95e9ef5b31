use ahash::AHashSet;

use crate::graph::{Edge, Node};

/// Checks whether a node selection can become a group.
///
/// Only edges internal to the selection count. A valid selection has at
/// least two nodes, exactly one node with a free output (the subflow's
/// future terminal node, which decomposition relies on being unique), and no
/// fully disconnected node.
pub fn validate_selection(nodes: &[Node], edges: &[Edge]) -> Vec<String> {
    let ids: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let internal: Vec<&Edge> = edges
        .iter()
        .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
        .collect();

    let mut errors = Vec::new();
    if nodes.len() < 2 {
        errors.push("Select at least two nodes to create a group.".to_string());
    }
    let free_outputs = nodes
        .iter()
        .filter(|node| !internal.iter().any(|e| e.source == node.id))
        .count();
    if free_outputs != 1 {
        errors.push(format!(
            "A group needs exactly one node with a free output, but the selection has {}.",
            free_outputs
        ));
    }
    if nodes.iter().any(|node| {
        !internal
            .iter()
            .any(|e| e.source == node.id || e.target == node.id)
    }) {
        errors.push("Every selected node must be connected to the selection.".to_string());
    }
    errors
}
