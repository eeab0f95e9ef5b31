//! Graph sanitizer: drops edges whose assumptions no longer hold.
//!
//! After any node or template mutation the editor re-runs [`clean_edges`];
//! any edge referencing a missing node, carrying an undecodable handle, or
//! whose handle no longer matches what the current node definition would
//! encode is removed. The stored handle strings are authoritative: a
//! snapshot whose `data` mirror is absent or stale sanitizes against the
//! strings and comes back with the mirror rebuilt. Stale edges are healed
//! silently; callers that want to warn the user diff the edge lists
//! themselves.

use tracing::debug;

use crate::graph::{Edge, EdgeData, Graph, Node};
use crate::handle::{decode_source_handle, decode_target_handle, SourceHandle, TargetHandle};

/// The target handle the node's current template would encode for the
/// given field, or `None` when the field no longer exists.
fn expected_target_handle(node: &Node, field_name: &str) -> Option<TargetHandle> {
    let field = node.template.get(field_name)?;
    Some(TargetHandle {
        field_type: field.field_type.clone(),
        field_name: field_name.to_string(),
        id: node.id.clone(),
        input_types: field.input_types.clone(),
        proxy: field.proxy.clone(),
    })
}

/// The source handle the node's current definition would encode.
fn expected_source_handle(node: &Node) -> SourceHandle {
    SourceHandle {
        id: node.id.clone(),
        base_classes: node.base_classes.clone(),
        data_type: node.node_type.clone(),
    }
}

/// Validates one edge against the current node definitions, decoding the
/// stored handle strings rather than trusting the optional `data` mirror.
/// On success the edge is returned with its mirror rebuilt from the
/// decoded handles.
fn validate_edge(edge: &Edge, nodes: &ahash::AHashMap<&str, &Node>) -> Option<Edge> {
    let source_node = nodes.get(edge.source.as_str())?;
    let target_node = nodes.get(edge.target.as_str())?;
    let source = decode_source_handle(&edge.source_handle).ok()?;
    let target = decode_target_handle(&edge.target_handle).ok()?;
    if expected_target_handle(target_node, &target.field_name)? != target {
        return None;
    }
    if expected_source_handle(source_node) != source {
        return None;
    }
    let mut edge = edge.clone();
    edge.data = EdgeData {
        source_handle: source,
        target_handle: target,
    };
    Some(edge)
}

/// Returns the subset of the graph's edges that are still valid against the
/// current node definitions, with each kept edge's typed mirror rebuilt
/// from its stored handle strings. Idempotent: a cleaned graph cleans to
/// itself.
pub fn clean_edges(graph: &Graph) -> Vec<Edge> {
    let nodes = graph.node_map();
    graph
        .edges
        .iter()
        .filter_map(|edge| {
            let kept = validate_edge(edge, &nodes);
            if kept.is_none() {
                debug!(edge_id = %edge.id, source = %edge.source, target = %edge.target,
                    "dropping stale edge");
            }
            kept
        })
        .collect()
}

/// Cheap pre-check: true when any edge still carries a legacy, non-encoded
/// handle. Used to gate a one-time [`update_edge_handles`] migration before
/// sanitization.
pub fn has_legacy_handles(edges: &[Edge]) -> bool {
    edges.iter().any(|edge| {
        edge.source_handle.is_empty()
            || edge.target_handle.is_empty()
            || !edge.source_handle.contains('{')
            || !edge.target_handle.contains('{')
    })
}

/// Rebuilds every edge's handles from the current node definitions,
/// migrating legacy `|`-separated handle ids to the canonical encoding.
///
/// Edge ids are preserved; edges whose endpoints cannot be resolved are
/// returned unchanged and left for [`clean_edges`] to drop.
pub fn update_edge_handles(graph: &Graph) -> Vec<Edge> {
    let nodes = graph.node_map();
    graph
        .edges
        .iter()
        .map(|edge| {
            let mut edge = edge.clone();
            let (Some(source), Some(target)) = (
                nodes.get(edge.source.as_str()),
                nodes.get(edge.target.as_str()),
            ) else {
                return edge;
            };
            let field_name = match decode_target_handle(&edge.target_handle) {
                Ok(handle) => handle.field_name,
                // Legacy target handles look like "Type|fieldName|nodeId".
                Err(_) => match edge.target_handle.split('|').nth(1) {
                    Some(name) => name.to_string(),
                    None => return edge,
                },
            };
            let Some(target_handle) = expected_target_handle(target, &field_name) else {
                return edge;
            };
            edge.set_target_handle(target_handle);
            edge.set_source_handle(expected_source_handle(source));
            edge
        })
        .collect()
}
