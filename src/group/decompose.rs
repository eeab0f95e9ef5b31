use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};

use crate::graph::{Graph, Node};
use crate::handle::{decode_source_handle, decode_target_handle, TargetHandle};

use super::terminal_node;

/// Splices a group node's embedded subflow back into the ambient graph.
///
/// Edges that targeted the group are redirected through the proxy on their
/// target handle to the real interior node; when the interior field belongs
/// to a further nested group, that deeper proxy is carried forward so the
/// edge stays redirectable in a single later pass. Edges sourced from the
/// group move to the subflow's terminal node. Values the user set on the
/// group's merged template are written back through each proxy, preserving
/// the interior field's own visibility, advanced flag, display name, and
/// proxy. Finally the group node and its edges are removed and the subflow
/// contents appended.
///
/// Takes the graph by value and returns the rewritten copy; the caller's
/// retained snapshot is never aliased. A node without an embedded flow is
/// returned unchanged.
pub fn ungroup_node(group: &Node, mut graph: Graph) -> Graph {
    let Some(flow) = group.flow.as_deref() else {
        return graph;
    };
    let mut sub_nodes = flow.data.nodes.clone();
    let sub_edges = flow.data.edges.clone();

    // Redirect every boundary edge before touching the node sets.
    let mut redirected = Vec::new();
    for edge in &graph.edges {
        if edge.target != group.id && edge.source != group.id {
            continue;
        }
        let mut edge = edge.clone();
        if edge.target == group.id {
            // The stored string is authoritative; fall back to the mirror
            // only when it cannot be decoded.
            let stored = decode_target_handle(&edge.target_handle)
                .unwrap_or_else(|_| edge.data.target_handle.clone());
            if let Some(proxy) = stored.proxy.clone() {
                match sub_nodes.iter().find(|n| n.id == proxy.id) {
                    Some(interior) => {
                        let mut handle = TargetHandle {
                            field_type: stored.field_type.clone(),
                            field_name: proxy.field.clone(),
                            id: proxy.id.clone(),
                            input_types: stored.input_types.clone(),
                            proxy: None,
                        };
                        if interior.is_group() {
                            handle.proxy = interior
                                .template
                                .get(&proxy.field)
                                .and_then(|f| f.proxy.clone());
                        }
                        edge.target = proxy.id.clone();
                        edge.set_target_handle(handle);
                    }
                    None => {
                        debug!(edge_id = %edge.id, proxy_id = %proxy.id,
                            "proxy points at a node missing from the subflow; leaving edge for the sanitizer");
                    }
                }
            }
        }
        if edge.source == group.id {
            if let Some(last) = terminal_node(&flow.data) {
                let mut handle = decode_source_handle(&edge.source_handle)
                    .unwrap_or_else(|_| edge.data.source_handle.clone());
                handle.id = last.id.clone();
                edge.source = last.id.clone();
                edge.set_source_handle(handle);
            }
        }
        edge.rederive_id();
        redirected.push(edge);
    }

    // Write the merged template's values back through the proxies. This is
    // the one place group state flows into the subflow; the interior
    // field's own show/advanced/display_name/proxy survive the overwrite.
    for (key, merged_field) in &group.template {
        let Some(proxy) = &merged_field.proxy else {
            continue;
        };
        let Some(node) = sub_nodes.iter_mut().find(|n| n.id == proxy.id) else {
            debug!(template_key = %key, proxy_id = %proxy.id,
                "proxy points at a node missing from the subflow; skipping write-back");
            continue;
        };
        let Some(interior) = node.template.get_mut(&proxy.field) else {
            continue;
        };
        let mut replacement = merged_field.clone();
        replacement.show = interior.show;
        replacement.advanced = interior.advanced;
        replacement.display_name = interior
            .display_name
            .clone()
            .or_else(|| interior.name.clone());
        replacement.proxy = interior.proxy.clone();
        *interior = replacement;
    }

    graph.nodes.retain(|n| n.id != group.id);
    graph.nodes.extend(sub_nodes);
    graph
        .edges
        .retain(|e| e.target != group.id && e.source != group.id);
    graph.edges.extend(sub_edges);
    graph.edges.extend(redirected);
    graph
}

/// Replaces every group node with its subflow's contents until no group
/// node remains. Used before execution so the runtime never sees nested
/// structure.
///
/// Groups are expanded one nesting level at a time, outermost first: the
/// proxy carry-forward in [`ungroup_node`] keeps edges into deeper groups
/// redirectable at the next level, so each edge is rewritten once per level
/// rather than resolved through the whole chain up front.
///
/// A flow can never embed itself, directly or transitively; a lineage check
/// refuses such groups and leaves them collapsed.
pub fn flatten_graph(mut graph: Graph) -> Graph {
    // Flow ids each node was spliced out of, for the self-embedding check.
    let mut lineage: AHashMap<String, AHashSet<String>> = AHashMap::new();
    let mut refused: AHashSet<String> = AHashSet::new();
    loop {
        let Some(group) = graph
            .nodes
            .iter()
            .find(|n| n.is_group() && !refused.contains(&n.id))
            .cloned()
        else {
            return graph;
        };
        let Some(flow) = group.flow.as_deref() else {
            refused.insert(group.id.clone());
            continue;
        };
        let ancestors = lineage.get(&group.id).cloned().unwrap_or_default();
        if ancestors.contains(&flow.id) {
            warn!(flow_id = %flow.id, node_id = %group.id,
                "refusing to expand self-embedding group");
            refused.insert(group.id.clone());
            continue;
        }
        let mut child_ancestors = ancestors;
        child_ancestors.insert(flow.id.clone());
        for child in &flow.data.nodes {
            lineage.insert(child.id.clone(), child_ancestors.clone());
        }
        graph = ungroup_node(&group, graph);
    }
}
