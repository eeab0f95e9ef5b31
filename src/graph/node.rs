use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::Flow;

/// A node's field templates, keyed by internal field name.
///
/// `BTreeMap` keeps iteration and serialization deterministic, which matters
/// for stable error ordering and reproducible snapshot exports.
pub type Template = BTreeMap<String, FieldDefinition>;

/// Back-reference from a merged group field to the node and field it
/// originated from inside the group's embedded flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRef {
    pub id: String,
    pub field: String,
}

/// One configurable field of a node template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Semantic data type, e.g. `"str"`, `"int"`, `"dict"`, or a class name.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub advanced: bool,
    /// Whether the field accepts multiple incoming connections.
    #[serde(default)]
    pub list: bool,
    /// Data types accepted from a connected source. `None` means the field
    /// declares no connection contract of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_types: Option<Vec<String>>,
    /// Present only on fields produced by group composition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyRef>,
    /// Redact the value on export when set.
    #[serde(default)]
    pub password: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl FieldDefinition {
    /// A minimal field of the given type; everything else off/empty.
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            value: Value::Null,
            required: false,
            show: false,
            advanced: false,
            list: false,
            input_types: None,
            proxy: None,
            password: false,
            name: None,
            display_name: None,
        }
    }
}

/// A single computation unit on the canvas.
///
/// A node whose `flow` is set is a *group node*: it embeds an entire subflow
/// and exposes a merged template whose fields proxy into that subflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Component kind this node was instantiated from.
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_classes: Vec<String>,
    #[serde(default)]
    pub output_types: Vec<String>,
    #[serde(default)]
    pub template: Template,
    /// The embedded subflow, present only on group nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<Box<Flow>>,
}

impl Node {
    pub fn is_group(&self) -> bool {
        self.flow.is_some()
    }
}
