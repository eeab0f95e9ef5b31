//! Handle codec: typed edge-endpoint descriptors and their canonical string
//! encoding.
//!
//! A handle identifies one end of a connection. Internally the crate works
//! with the typed records [`SourceHandle`] and [`TargetHandle`] and compares
//! them structurally; the string encoding exists only at serialization
//! boundaries (the stored `sourceHandle`/`targetHandle` fields of an edge and
//! the derived edge id).
//!
//! The encoding is a canonical JSON rendering (object keys sorted
//! lexicographically at every depth, so two semantically identical handles
//! are byte-identical) with every `"` replaced by the placeholder `œ`. The
//! placeholder lets the encoded handle be embedded inside identifier strings
//! that use `"` as a delimiter. `decode(encode(h)) == h` for any handle.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::HandleError;
use crate::graph::ProxyRef;

/// Placeholder substituted for `"` inside encoded handles.
pub const QUOTE_PLACEHOLDER: char = 'œ';

/// Connection contract of an edge's source endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceHandle {
    /// Id of the source node.
    pub id: String,
    /// Classes the source node's output satisfies.
    pub base_classes: Vec<String>,
    /// Declared output data type of the source node.
    pub data_type: String,
}

/// Connection contract of an edge's target endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetHandle {
    /// Declared type of the target field.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Name of the target field within the node's template.
    pub field_name: String,
    /// Id of the target node.
    pub id: String,
    /// Acceptable source data types, mirrored from the field definition.
    /// Always present in the encoding (`null` when the field declares none).
    #[serde(default)]
    pub input_types: Option<Vec<String>>,
    /// Mirrored proxy when the target field was produced by group
    /// composition. Omitted from the encoding when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyRef>,
}

impl SourceHandle {
    pub fn encode(&self) -> String {
        let value = json!({
            "baseClasses": self.base_classes,
            "dataType": self.data_type,
            "id": self.id,
        });
        escape_quotes(&canonical_json(&value))
    }
}

impl TargetHandle {
    pub fn encode(&self) -> String {
        let mut value = json!({
            "fieldName": self.field_name,
            "id": self.id,
            "inputTypes": self.input_types,
            "type": self.field_type,
        });
        if let Some(proxy) = &self.proxy {
            value["proxy"] = json!({ "field": proxy.field, "id": proxy.id });
        }
        escape_quotes(&canonical_json(&value))
    }
}

/// Decodes an encoded source handle, failing on malformed input.
pub fn decode_source_handle(encoded: &str) -> Result<SourceHandle, HandleError> {
    serde_json::from_str(&unescape_quotes(encoded)).map_err(|e| HandleError::Malformed {
        handle: encoded.to_string(),
        message: e.to_string(),
    })
}

/// Decodes an encoded target handle, failing on malformed input.
pub fn decode_target_handle(encoded: &str) -> Result<TargetHandle, HandleError> {
    serde_json::from_str(&unescape_quotes(encoded)).map_err(|e| HandleError::Malformed {
        handle: encoded.to_string(),
        message: e.to_string(),
    })
}

/// Derives the deterministic edge id for a (source, target, handles) tuple.
///
/// Because the encoding is canonical, a duplicate connection produces the
/// same id and is structurally indistinguishable from the original.
pub fn derive_edge_id(
    source: &str,
    encoded_source_handle: &str,
    target: &str,
    encoded_target_handle: &str,
) -> String {
    format!(
        "edge-{}{}-{}{}",
        source, encoded_source_handle, target, encoded_target_handle
    )
}

/// Renders a JSON value with object keys sorted lexicographically at every
/// depth, so that key insertion order never leaks into the output.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, key) in map.keys().sorted().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(key, out);
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Replaces every `"` with [`QUOTE_PLACEHOLDER`].
pub fn escape_quotes(s: &str) -> String {
    s.replace('"', &QUOTE_PLACEHOLDER.to_string())
}

/// Restores the `"` characters hidden by [`escape_quotes`].
pub fn unescape_quotes(s: &str) -> String {
    s.replace(QUOTE_PLACEHOLDER, "\"")
}
