//! The in-memory graph model: flows, nodes, fields, and edges.
//!
//! These are plain serde value types; all behavior lives in the
//! [`sanitize`](crate::sanitize), [`validate`](crate::validate),
//! [`group`](crate::group), and [`export`](crate::export) modules, which
//! operate on snapshots of this model.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

mod edge;
mod node;

pub use edge::{Edge, EdgeData};
pub use node::{FieldDefinition, Node, ProxyRef, Template};

/// A graph snapshot: the persisted `{nodes, edges}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// An id-to-node lookup table for passes that resolve many edges.
    pub(crate) fn node_map(&self) -> AHashMap<&str, &Node> {
        self.nodes.iter().map(|n| (n.id.as_str(), n)).collect()
    }
}

/// A named flow wrapping a graph snapshot. Group nodes embed one of these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub data: Graph,
}

impl Flow {
    /// Parses a flow from its persisted JSON representation.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        serde_json::from_str(json).map_err(|e| FlowError::JsonParseError(e.to_string()))
    }

    /// Serializes the flow to its persisted JSON representation.
    pub fn to_json(&self) -> Result<String, FlowError> {
        serde_json::to_string_pretty(self).map_err(|e| FlowError::JsonParseError(e.to_string()))
    }
}
