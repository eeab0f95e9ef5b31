//! Handle codec round-trips and canonical encoding guarantees.
mod common;
use flowgraph::handle::{canonical_json, escape_quotes, unescape_quotes, QUOTE_PLACEHOLDER};
use flowgraph::prelude::*;
use serde_json::json;

fn sample_target_handle() -> TargetHandle {
    TargetHandle {
        field_type: "BaseChat".to_string(),
        field_name: "llm".to_string(),
        id: "prompt-1".to_string(),
        input_types: Some(vec!["Chat".to_string(), "LLM".to_string()]),
        proxy: Some(ProxyRef {
            id: "inner-1".to_string(),
            field: "llm".to_string(),
        }),
    }
}

#[test]
fn test_target_handle_round_trip() {
    let handle = sample_target_handle();
    let decoded = decode_target_handle(&handle.encode()).unwrap();
    assert_eq!(decoded, handle);
}

#[test]
fn test_source_handle_round_trip() {
    let handle = SourceHandle {
        id: "model-1".to_string(),
        base_classes: vec!["Chat".to_string(), "BaseLLM".to_string()],
        data_type: "ChatModel".to_string(),
    };
    let decoded = decode_source_handle(&handle.encode()).unwrap();
    assert_eq!(decoded, handle);
}

#[test]
fn test_encoding_is_key_order_insensitive() {
    // The same handle written with two different key orders must decode
    // and re-encode to byte-identical strings.
    let a = escape_quotes(
        r#"{"fieldName":"llm","id":"n1","inputTypes":["Chat"],"type":"BaseChat"}"#,
    );
    let b = escape_quotes(
        r#"{"type":"BaseChat","inputTypes":["Chat"],"id":"n1","fieldName":"llm"}"#,
    );
    let decoded_a = decode_target_handle(&a).unwrap();
    let decoded_b = decode_target_handle(&b).unwrap();
    assert_eq!(decoded_a, decoded_b);
    assert_eq!(decoded_a.encode(), decoded_b.encode());
}

#[test]
fn test_encoded_handle_contains_no_quotes() {
    let encoded = sample_target_handle().encode();
    assert!(!encoded.contains('"'));
    assert!(encoded.contains(QUOTE_PLACEHOLDER));
    assert!(encoded.contains('{'));
}

#[test]
fn test_input_types_encode_as_null_when_absent() {
    let handle = TargetHandle {
        field_type: "str".to_string(),
        field_name: "text".to_string(),
        id: "n1".to_string(),
        input_types: None,
        proxy: None,
    };
    let raw = unescape_quotes(&handle.encode());
    assert!(raw.contains(r#""inputTypes":null"#));
    // Proxy is omitted entirely when absent.
    assert!(!raw.contains("proxy"));
    assert_eq!(decode_target_handle(&handle.encode()).unwrap(), handle);
}

#[test]
fn test_canonical_json_sorts_nested_keys() {
    let value = json!({ "b": { "z": 1, "a": [true, null] }, "a": "x" });
    assert_eq!(
        canonical_json(&value),
        r#"{"a":"x","b":{"a":[true,null],"z":1}}"#
    );
}

#[test]
fn test_decode_rejects_malformed_input() {
    assert!(decode_target_handle("not a handle").is_err());
    assert!(decode_source_handle("").is_err());
}

#[test]
fn test_edge_id_is_deterministic() {
    let graph = common::chat_graph();
    let model = graph.node("model-1").unwrap();
    let prompt = graph.node("prompt-1").unwrap();
    let first = common::connect(model, prompt, "llm");
    let second = common::connect(model, prompt, "llm");
    // A duplicate connection is structurally indistinguishable.
    assert_eq!(first.id, second.id);
    assert!(first.id.starts_with("edge-model-1"));
}

#[test]
fn test_edge_keeps_encoded_and_decoded_handles_in_sync() {
    let graph = common::chat_graph();
    let edge = &graph.edges[0];
    assert_eq!(
        decode_target_handle(&edge.target_handle).unwrap(),
        edge.data.target_handle
    );
    assert_eq!(
        decode_source_handle(&edge.source_handle).unwrap(),
        edge.data.source_handle
    );
}

#[test]
fn test_graph_snapshot_round_trips_through_serde() {
    let graph = common::chat_graph();
    let json = serde_json::to_string(&graph).unwrap();
    let restored: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, graph);
}
