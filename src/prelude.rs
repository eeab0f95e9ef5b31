//! Prelude module for convenient imports
//!
//! Re-exports the model types and transformation entry points most callers
//! need, so the common editor operations are available from one import.

// Graph model
pub use crate::graph::{Edge, EdgeData, FieldDefinition, Flow, Graph, Node, ProxyRef, Template};

// Handle codec
pub use crate::handle::{
    decode_source_handle, decode_target_handle, derive_edge_id, SourceHandle, TargetHandle,
};

// Sanitization
pub use crate::sanitize::{clean_edges, has_legacy_handles, update_edge_handles};

// Validation
pub use crate::validate::{
    is_valid_connection, validate_graph, validate_node, validate_selection,
};

// Group composition and decomposition
pub use crate::group::{
    build_group_node, flatten_graph, group_template_for_flow, merge_node_templates,
    terminal_node, ungroup_node,
};

// Snapshot operations
pub use crate::export::{
    dedupe_flow_name, extract_selection, redact_secrets, update_ids, update_template,
};

// Error types
pub use crate::error::{FlowError, HandleError};
