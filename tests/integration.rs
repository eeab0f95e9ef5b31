//! End-to-end editor scenarios and snapshot-level operations.
mod common;
use flowgraph::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_full_editing_session() {
    // Draw the graph the way the editor would: validate, connect, group,
    // flatten, and sanitize along the way.
    let mut model = common::node("model-1", "ChatModel", &["Chat"]);
    model
        .template
        .insert("temperature".to_string(), common::text_field("0.7"));
    let mut prompt = common::node("prompt-1", "Prompt", &["Text"]);
    prompt
        .template
        .insert("llm".to_string(), common::input_field("BaseChat", &["Chat"]));
    let mut graph = Graph {
        nodes: vec![model.clone(), prompt.clone()],
        edges: Vec::new(),
    };

    // The connection is gated before the edge is drawn.
    let source = common::source_handle_for(&model);
    let target = common::target_handle_for(&prompt, "llm");
    assert!(is_valid_connection(&source, &target, &graph));
    graph.edges.push(Edge::new(source, target));
    assert!(validate_graph(&graph).is_empty());

    // Group the whole thing and put the group into a fresh graph.
    assert!(validate_selection(&graph.nodes, &graph.edges).is_empty());
    let (flow, removed) = extract_selection(&graph.nodes, &graph.edges, "Chat Block");
    assert!(removed.is_empty());
    let mut next_id = common::id_generator();
    let group = build_group_node(flow, &mut next_id).unwrap();
    let collapsed = Graph {
        nodes: vec![group],
        edges: Vec::new(),
    };

    // Flattening for execution restores the primitive graph.
    let flat = flatten_graph(collapsed);
    assert_eq!(flat.nodes.len(), 2);
    assert_eq!(flat.edges.len(), 1);
    assert!(flat.nodes.iter().all(|n| !n.is_group()));
    assert_eq!(clean_edges(&flat).len(), 1);
    assert!(validate_graph(&flat).is_empty());
}

#[test]
fn test_extract_selection_reports_dropped_boundary_edges() {
    let mut graph = common::chat_graph();
    let mut output = common::node("out-1", "TextOutput", &["Text"]);
    output
        .template
        .insert("text".to_string(), common::input_field("str", &["Text"]));
    let prompt = graph.node("prompt-1").unwrap().clone();
    let boundary = common::connect(&prompt, &output, "text");
    graph.edges.push(boundary.clone());
    graph.nodes.push(output);

    // Select only the chat pair; the edge to the output node is lost.
    let selection: Vec<Node> = graph
        .nodes
        .iter()
        .filter(|n| n.id != "out-1")
        .cloned()
        .collect();
    let (flow, removed) = extract_selection(&selection, &graph.edges, "Chat Block");
    assert_eq!(flow.data.edges.len(), 1);
    assert_eq!(removed, vec![boundary]);
    assert!(!flow.id.is_empty());
}

#[test]
fn test_redact_secrets_clears_password_fields() {
    let mut graph = common::chat_graph();
    if let Some(node) = graph.nodes.iter_mut().find(|n| n.id == "model-1") {
        let mut field = common::text_field("sk-secret");
        field.password = true;
        node.template.insert("api_key".to_string(), field);
    }
    let flow = Flow {
        id: "flow-1".to_string(),
        name: "Chat".to_string(),
        description: String::new(),
        data: graph,
    };

    let redacted = redact_secrets(&flow);
    let field = &redacted.data.nodes[0].template["api_key"];
    assert_eq!(field.value, Value::String(String::new()));
    // The original snapshot is untouched.
    assert_eq!(
        flow.data.nodes[0].template["api_key"].value,
        json!("sk-secret")
    );
}

#[test]
fn test_redact_secrets_recurses_into_group_subflows() {
    let mut graph = common::chat_graph();
    if let Some(node) = graph.nodes.iter_mut().find(|n| n.id == "model-1") {
        let mut field = common::text_field("sk-secret");
        field.password = true;
        node.template.insert("api_key".to_string(), field);
    }
    let (inner, _) = extract_selection(&graph.nodes, &graph.edges, "Inner");
    let mut next_id = common::id_generator();
    let group = build_group_node(inner, &mut next_id).unwrap();
    let flow = Flow {
        id: "flow-1".to_string(),
        name: "Outer".to_string(),
        description: String::new(),
        data: Graph {
            nodes: vec![group],
            edges: Vec::new(),
        },
    };

    let redacted = redact_secrets(&flow);
    let embedded = redacted.data.nodes[0].flow.as_ref().unwrap();
    let model = embedded.data.node("model-1").unwrap();
    assert_eq!(model.template["api_key"].value, json!(""));
}

#[test]
fn test_update_ids_rewrites_nodes_edges_and_handles() {
    let mut graph = common::chat_graph();
    let mut next_id = common::id_generator();
    update_ids(&mut graph, &mut next_id);

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["ChatModel-1", "Prompt-2"]);
    let edge = &graph.edges[0];
    assert_eq!(edge.source, "ChatModel-1");
    assert_eq!(edge.target, "Prompt-2");
    assert_eq!(edge.data.source_handle.id, "ChatModel-1");
    assert_eq!(edge.data.target_handle.id, "Prompt-2");
    // Handles were re-encoded, so the graph still sanitizes clean.
    assert_eq!(clean_edges(&graph).len(), 1);
    assert!(edge.id.starts_with("edge-ChatModel-1"));
}

#[test]
fn test_update_ids_works_without_data_mirror() {
    let mut graph = common::chat_graph();
    let expected = {
        let mut with_mirror = graph.clone();
        let mut next_id = common::id_generator();
        update_ids(&mut with_mirror, &mut next_id);
        with_mirror.edges
    };
    for edge in &mut graph.edges {
        edge.data = EdgeData::default();
    }
    let mut next_id = common::id_generator();
    update_ids(&mut graph, &mut next_id);
    // The stored strings drive the refresh, so the result is identical.
    assert_eq!(graph.edges, expected);
}

#[test]
fn test_update_ids_keys_group_nodes_separately() {
    let graph = common::chat_graph();
    let (flow, _) = extract_selection(&graph.nodes, &graph.edges, "Block");
    let mut next_id = common::id_generator();
    let group = build_group_node(flow, &mut next_id).unwrap();
    let mut pasted = Graph {
        nodes: vec![group],
        edges: Vec::new(),
    };

    update_ids(&mut pasted, &mut next_id);
    assert_eq!(pasted.nodes[0].id, "GroupNode-2");
}

#[test]
fn test_update_template_preserves_user_edits() {
    let graph = common::chat_graph();
    let previous = graph.node("model-1").unwrap().template.clone();

    // The component ships a new definition: fresh default, new field.
    let mut reference = previous.clone();
    if let Some(field) = reference.get_mut("temperature") {
        field.value = json!("1.0");
    }
    reference.insert("max_tokens".to_string(), common::text_field(""));

    let mut previous = previous;
    if let Some(field) = previous.get_mut("temperature") {
        field.value = json!("0.2");
        field.advanced = true;
    }

    let merged = update_template(&reference, &previous);
    assert_eq!(merged["temperature"].value, json!("0.2"));
    assert!(merged["temperature"].advanced);
    assert_eq!(merged["max_tokens"].value, json!(""));
}

#[test]
fn test_update_template_keeps_false_and_zero_edits() {
    // `false` and `0` are real user choices, not unset values; only null
    // and the empty string fall back to the new default.
    let mut reference = Template::new();
    let mut toggle = FieldDefinition::new("bool");
    toggle.value = json!(true);
    reference.insert("stream".to_string(), toggle);
    let mut count = FieldDefinition::new("int");
    count.value = json!(3);
    reference.insert("retries".to_string(), count);

    let mut previous = reference.clone();
    if let Some(field) = previous.get_mut("stream") {
        field.value = json!(false);
    }
    if let Some(field) = previous.get_mut("retries") {
        field.value = json!(0);
    }

    let merged = update_template(&reference, &previous);
    assert_eq!(merged["stream"].value, json!(false));
    assert_eq!(merged["retries"].value, json!(0));
}

#[test]
fn test_dedupe_flow_name_appends_counter() {
    let flows = vec![
        Flow {
            id: "1".to_string(),
            name: "Chat".to_string(),
            description: String::new(),
            data: Graph::default(),
        },
        Flow {
            id: "2".to_string(),
            name: "Chat (1)".to_string(),
            description: String::new(),
            data: Graph::default(),
        },
    ];
    assert_eq!(dedupe_flow_name("Chat", &flows), "Chat (2)");
    assert_eq!(dedupe_flow_name("Agent", &flows), "Agent");
}

#[test]
fn test_flow_json_round_trip() {
    let flow = Flow {
        id: "flow-1".to_string(),
        name: "Chat".to_string(),
        description: "demo".to_string(),
        data: common::chat_graph(),
    };
    let restored = Flow::from_json(&flow.to_json().unwrap()).unwrap();
    assert_eq!(restored, flow);

    assert!(Flow::from_json("{").is_err());
}
