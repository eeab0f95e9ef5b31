use crate::graph::{Edge, FieldDefinition, Flow, Node, ProxyRef, Template};
use crate::handle::{decode_target_handle, TargetHandle};
use crate::text::title_case;

use super::terminal_node;

/// Field types considered "simple" when deciding the group's default
/// surface: non-required simple fields without input types are demoted to
/// advanced.
const SIMPLE_FIELD_TYPES: [&str; 9] = [
    "str",
    "bool",
    "float",
    "code",
    "prompt",
    "file",
    "int",
    "dict",
    "NestedDict",
];

/// True when some edge already feeds this exact field on this node.
///
/// Detection re-derives the field's target handle (including proxy
/// parameters when the field carries one) and looks for it among the
/// edges, so it matches precisely what the editor would have encoded.
fn is_field_connected(edges: &[Edge], key: &str, field: &FieldDefinition, node_id: &str) -> bool {
    let handle = TargetHandle {
        field_type: field.field_type.clone(),
        field_name: key.to_string(),
        id: node_id.to_string(),
        input_types: field.input_types.clone(),
        proxy: field.proxy.clone(),
    };
    edges
        .iter()
        .any(|edge| decode_target_handle(&edge.target_handle).is_ok_and(|h| h == handle))
}

/// Merges the templates of a node subset into one group-surface template.
///
/// Internally reserved fields (leading underscore) and fields already wired
/// from within the subset are skipped. Surviving fields are keyed
/// `field_nodeId` to disambiguate identical names across nodes and stamped
/// with a proxy recording their provenance.
pub fn merge_node_templates(nodes: &[Node], edges: &[Edge]) -> Template {
    let mut merged = Template::new();
    for node in nodes {
        for (key, field) in &node.template {
            if key.starts_with('_') {
                continue;
            }
            if is_field_connected(edges, key, field, &node.id) {
                continue;
            }
            let mut merged_field = field.clone();
            merged_field.proxy = Some(ProxyRef {
                id: node.id.clone(),
                field: key.clone(),
            });
            merged_field.display_name = Some(match &node.flow {
                Some(flow) => format!(
                    "{} - {}",
                    flow.name,
                    field.name.clone().unwrap_or_else(|| key.clone())
                ),
                None => field.display_name.clone().unwrap_or_else(|| {
                    title_case(field.name.as_deref().unwrap_or(key))
                }),
            });
            merged.insert(format!("{}_{}", key, node.id), merged_field);
        }
    }
    merged
}

/// Post-pass keeping the group's default-visible surface small: simple
/// optional fields become advanced, and code fields are never shown on a
/// group node.
pub fn update_group_template(template: &mut Template) {
    for field in template.values_mut() {
        if SIMPLE_FIELD_TYPES.contains(&field.field_type.as_str())
            && !field.required
            && field.input_types.is_none()
        {
            field.advanced = true;
        }
        if field.field_type == "code" {
            field.show = false;
        }
    }
}

/// The complete merged template a group node exposes for the given flow.
pub fn group_template_for_flow(flow: &Flow) -> Template {
    let mut template = merge_node_templates(&flow.data.nodes, &flow.data.edges);
    update_group_template(&mut template);
    template
}

/// Materializes a group node embedding the given flow.
///
/// The node id comes from the caller's generator, keyed by the terminal
/// node's component type; output classes are inherited from the terminal
/// node so the group connects like the subflow it stands for. Returns
/// `None` when the flow has no terminal node.
pub fn build_group_node<F>(flow: Flow, next_id: &mut F) -> Option<Node>
where
    F: FnMut(&str) -> String,
{
    let terminal = terminal_node(&flow.data)?.clone();
    let template = group_template_for_flow(&flow);
    Some(Node {
        id: next_id(&terminal.node_type),
        node_type: terminal.node_type.clone(),
        display_name: Some("Group".to_string()),
        description: String::new(),
        base_classes: terminal.base_classes.clone(),
        output_types: terminal.output_types.clone(),
        template,
        flow: Some(Box::new(flow)),
    })
}
