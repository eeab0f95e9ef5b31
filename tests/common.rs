//! Common test utilities for building graph fixtures.
use flowgraph::prelude::*;
use serde_json::Value;

/// A field that is visible in the editor and accepts the given source types.
#[allow(dead_code)]
pub fn input_field(field_type: &str, input_types: &[&str]) -> FieldDefinition {
    let mut field = FieldDefinition::new(field_type);
    field.show = true;
    field.input_types = Some(input_types.iter().map(|s| s.to_string()).collect());
    field
}

/// A plain visible text field with a value.
#[allow(dead_code)]
pub fn text_field(value: &str) -> FieldDefinition {
    let mut field = FieldDefinition::new("str");
    field.show = true;
    field.value = Value::String(value.to_string());
    field
}

/// A bare node with no template fields.
#[allow(dead_code)]
pub fn node(id: &str, node_type: &str, base_classes: &[&str]) -> Node {
    Node {
        id: id.to_string(),
        node_type: node_type.to_string(),
        display_name: None,
        description: String::new(),
        base_classes: base_classes.iter().map(|s| s.to_string()).collect(),
        output_types: Vec::new(),
        template: Template::new(),
        flow: None,
    }
}

/// The source handle the given node would advertise.
#[allow(dead_code)]
pub fn source_handle_for(node: &Node) -> SourceHandle {
    SourceHandle {
        id: node.id.clone(),
        base_classes: node.base_classes.clone(),
        data_type: node.node_type.clone(),
    }
}

/// The target handle the given node's template would encode for a field.
#[allow(dead_code)]
pub fn target_handle_for(node: &Node, field_name: &str) -> TargetHandle {
    let field = &node.template[field_name];
    TargetHandle {
        field_type: field.field_type.clone(),
        field_name: field_name.to_string(),
        id: node.id.clone(),
        input_types: field.input_types.clone(),
        proxy: field.proxy.clone(),
    }
}

/// An edge wired the way the editor would wire it.
#[allow(dead_code)]
pub fn connect(source: &Node, target: &Node, field_name: &str) -> Edge {
    Edge::new(source_handle_for(source), target_handle_for(target, field_name))
}

/// Two chat components and the edge between them:
/// `model` (base class `Chat`) feeding `prompt.llm` (`input_types: [Chat]`).
#[allow(dead_code)]
pub fn chat_graph() -> Graph {
    let mut model = node("model-1", "ChatModel", &["Chat"]);
    model
        .template
        .insert("temperature".to_string(), text_field("0.7"));
    let mut prompt = node("prompt-1", "Prompt", &["Text"]);
    prompt
        .template
        .insert("llm".to_string(), input_field("BaseChat", &["Chat"]));
    prompt
        .template
        .insert("text".to_string(), text_field("Hello {name}"));
    let edge = connect(&model, &prompt, "llm");
    Graph {
        nodes: vec![model, prompt],
        edges: vec![edge],
    }
}

/// A fresh sequential id generator in the shape consumers provide.
#[allow(dead_code)]
pub fn id_generator() -> impl FnMut(&str) -> String {
    let mut counter = 0;
    move |kind: &str| {
        counter += 1;
        format!("{}-{}", kind, counter)
    }
}
