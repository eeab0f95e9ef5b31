use serde_json::Value;

use crate::graph::{Edge, FieldDefinition, Graph, Node};
use crate::handle::decode_target_handle;
use crate::text::normal_case;

/// The structured-mapping field type, subject to key checks.
const DICT_TYPE: &str = "dict";

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn field_label(key: &str, field: &FieldDefinition) -> String {
    field
        .display_name
        .clone()
        .unwrap_or_else(|| normal_case(field.name.as_deref().unwrap_or(key)))
}

/// True when the value's entries repeat a key. Dict values are stored as an
/// array of single-key objects; a plain object cannot repeat keys and is
/// never flagged.
pub fn has_duplicate_keys(value: &Value) -> bool {
    let Value::Array(entries) = value else {
        return false;
    };
    let mut seen = ahash::AHashSet::new();
    for entry in entries {
        if let Value::Object(map) = entry {
            for key in map.keys() {
                if !seen.insert(key.clone()) {
                    return true;
                }
            }
        }
    }
    false
}

/// True when any entry of the value carries an empty key.
pub fn has_empty_key(value: &Value) -> bool {
    match value {
        Value::Array(entries) => entries.iter().any(|entry| match entry {
            Value::Object(map) => map.contains_key(""),
            _ => false,
        }),
        Value::Object(map) => map.contains_key(""),
        _ => false,
    }
}

/// Checks that every required, visible field of the node is either filled
/// or fed by an incoming edge, and that required dict fields carry
/// well-formed keys. Returns display-ready messages.
///
/// A node without a usable template gets a single generic error; no
/// field-level analysis is attempted.
pub fn validate_node(node: &Node, edges: &[Edge]) -> Vec<String> {
    if node.template.is_empty() {
        return vec![
            "A node in the flow is malformed and cannot be validated. Please review it and, \
             if the problem persists, report it with your exported flow file."
                .to_string(),
        ];
    }

    let mut errors = Vec::new();
    for (key, field) in &node.template {
        if !(field.required && field.show) {
            continue;
        }
        let connected = edges.iter().any(|edge| {
            decode_target_handle(&edge.target_handle)
                .is_ok_and(|h| h.field_name == *key && h.id == node.id)
        });
        if is_empty_value(&field.value) && !connected {
            errors.push(format!(
                "{} is missing {}.",
                node.node_type,
                field_label(key, field)
            ));
        }
        // Key checks run regardless of the emptiness check above.
        if field.field_type == DICT_TYPE {
            if has_duplicate_keys(&field.value) {
                errors.push(format!(
                    "{} ({}) contains duplicate keys.",
                    node.node_type,
                    field_label(key, field)
                ));
            }
            if has_empty_key(&field.value) {
                errors.push(format!(
                    "{} ({}) must not contain empty keys.",
                    node.node_type,
                    field_label(key, field)
                ));
            }
        }
    }
    errors
}

/// Validates every node in the graph. An empty graph yields a single
/// distinct error rather than an empty list.
pub fn validate_graph(graph: &Graph) -> Vec<String> {
    if graph.nodes.is_empty() {
        return vec![
            "No nodes found in the flow. Please add at least one node to the flow.".to_string(),
        ];
    }
    graph
        .nodes
        .iter()
        .flat_map(|node| validate_node(node, &graph.edges))
        .collect()
}
