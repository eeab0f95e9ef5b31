//! Snapshot-level operations: export redaction, id remapping, selection
//! extraction, and template upgrades.

use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use uuid::Uuid;

use crate::graph::{Edge, Flow, Graph, Node, Template};
use crate::handle::{decode_source_handle, decode_target_handle};

/// Returns a deep copy of the flow with every password field's value reset,
/// recursing into embedded group subflows. Run before writing a flow to any
/// persisted or shared representation.
pub fn redact_secrets(flow: &Flow) -> Flow {
    let mut flow = flow.clone();
    redact_graph(&mut flow.data);
    flow
}

fn redact_graph(graph: &mut Graph) {
    for node in &mut graph.nodes {
        for field in node.template.values_mut() {
            if field.password {
                field.value = Value::String(String::new());
            }
        }
        if let Some(embedded) = node.flow.as_deref_mut() {
            redact_graph(&mut embedded.data);
        }
    }
}

/// Extracts a selection into a new flow with a locally generated id.
///
/// Only edges connected to selected nodes on both ends survive; the dropped
/// boundary edges are returned alongside so the caller can warn the user
/// about lost connections.
pub fn extract_selection(nodes: &[Node], edges: &[Edge], name: &str) -> (Flow, Vec<Edge>) {
    let ids: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let (kept, removed): (Vec<Edge>, Vec<Edge>) = edges
        .iter()
        .filter(|e| ids.contains(e.source.as_str()) || ids.contains(e.target.as_str()))
        .cloned()
        .partition(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
    let flow = Flow {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: String::new(),
        data: Graph {
            nodes: nodes.to_vec(),
            edges: kept,
        },
    };
    (flow, removed)
}

/// Re-keys every node through the caller's id generator and rewrites edge
/// endpoints, handles, and derived edge ids to match.
///
/// Group nodes are keyed as `"GroupNode"`; uniqueness of the generated ids
/// across the whole graph is the caller's responsibility. Used when pasting
/// or importing a flow into a graph that may already contain those ids.
pub fn update_ids<F>(graph: &mut Graph, next_id: &mut F)
where
    F: FnMut(&str) -> String,
{
    let mut ids: AHashMap<String, String> = AHashMap::new();
    for node in &mut graph.nodes {
        let kind = if node.is_group() {
            "GroupNode"
        } else {
            node.node_type.as_str()
        };
        let new_id = next_id(kind);
        ids.insert(node.id.clone(), new_id.clone());
        node.id = new_id;
    }
    for edge in &mut graph.edges {
        if let Some(source) = ids.get(&edge.source) {
            edge.source = source.clone();
            let mut handle = decode_source_handle(&edge.source_handle)
                .unwrap_or_else(|_| edge.data.source_handle.clone());
            handle.id = source.clone();
            edge.set_source_handle(handle);
        }
        if let Some(target) = ids.get(&edge.target) {
            edge.target = target.clone();
            let mut handle = decode_target_handle(&edge.target_handle)
                .unwrap_or_else(|_| edge.data.target_handle.clone());
            handle.id = target.clone();
            edge.set_target_handle(handle);
        }
        edge.rederive_id();
    }
}

/// Carries user edits from an old template into a freshly upgraded one:
/// non-empty values and the advanced flag survive the upgrade, everything
/// else comes from the new definition.
pub fn update_template(reference: &Template, previous: &Template) -> Template {
    let mut merged = reference.clone();
    for (key, field) in &mut merged {
        if let Some(old) = previous.get(key) {
            match &old.value {
                Value::Null => {}
                Value::String(s) if s.is_empty() => {}
                value => field.value = value.clone(),
            }
            field.advanced = old.advanced;
        }
    }
    merged
}

/// Appends ` (n)` to the name until it collides with no existing flow.
pub fn dedupe_flow_name(name: &str, flows: &[Flow]) -> String {
    let existing: AHashSet<&str> = flows.iter().map(|f| f.name.as_str()).collect();
    let mut candidate = name.to_string();
    let mut count = 1;
    while existing.contains(candidate.as_str()) {
        candidate = format!("{} ({})", name, count);
        count += 1;
    }
    candidate
}
