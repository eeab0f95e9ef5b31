//! # Flowgraph - Graph Model and Transformation Core for Visual Flow Editors
//!
//! **Flowgraph** implements the graph consistency and transformation engine
//! behind a node-based visual editor: a directed graph where each node is a
//! configurable component and each edge is a typed connection between
//! component fields. The crate keeps node templates, edge handles, and
//! nested group subflows semantically valid as the graph is edited, and can
//! losslessly flatten nested groups into an equivalent primitive graph.
//!
//! Rendering, networking, and UI state are out of scope: consumers hand in
//! graph snapshots and get back updated snapshots or validation results.
//! Every operation is a synchronous, pure-data transformation (owned input
//! in, owned output out), so the owning editor can serialize edits onto one
//! logical timeline without any locking in here.
//!
//! ## Core Workflow
//!
//! 1. **Deserialize** a [`Flow`](graph::Flow) or [`Graph`](graph::Graph)
//!    snapshot (`{nodes, edges}`) with serde.
//! 2. **Sanitize** after any node or template mutation with
//!    [`clean_edges`](sanitize::clean_edges): edges whose encoded handles
//!    no longer match the current node definitions are dropped.
//! 3. **Gate connections** with
//!    [`is_valid_connection`](validate::is_valid_connection) before letting
//!    the user draw an edge, and **validate** with
//!    [`validate_graph`](validate::validate_graph) before running a flow.
//! 4. **Group** a selection via
//!    [`extract_selection`](export::extract_selection) and
//!    [`build_group_node`](group::build_group_node); **ungroup** or
//!    **flatten** with [`ungroup_node`](group::ungroup_node) and
//!    [`flatten_graph`](group::flatten_graph).
//!
//! ## Quick Start
//!
//! ```rust
//! use flowgraph::prelude::*;
//!
//! // Two components: a chat model feeding a prompt's input field.
//! let source = SourceHandle {
//!     id: "model-1".to_string(),
//!     base_classes: vec!["Chat".to_string()],
//!     data_type: "ChatModel".to_string(),
//! };
//! let target = TargetHandle {
//!     field_type: "Chat".to_string(),
//!     field_name: "llm".to_string(),
//!     id: "prompt-1".to_string(),
//!     input_types: Some(vec!["Chat".to_string()]),
//!     proxy: None,
//! };
//!
//! let graph = Graph::default();
//! assert!(is_valid_connection(&source, &target, &graph));
//!
//! // Handles round-trip through their canonical encoding.
//! let encoded = target.encode();
//! assert_eq!(decode_target_handle(&encoded).unwrap(), target);
//! ```

pub mod error;
pub mod export;
pub mod graph;
pub mod group;
pub mod handle;
pub mod prelude;
pub mod sanitize;
pub mod text;
pub mod validate;
