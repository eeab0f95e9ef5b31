use serde::{Deserialize, Serialize};

use crate::handle::{derive_edge_id, SourceHandle, TargetHandle};

/// Decoded mirror of an edge's encoded handle strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub source_handle: SourceHandle,
    pub target_handle: TargetHandle,
}

/// A typed connection between two node fields.
///
/// The encoded `source_handle`/`target_handle` strings are the persisted,
/// authoritative representation; the `data` mirror is an optional decoded
/// convenience that snapshots may omit. [`Edge::new`] and the handle
/// setters keep the two in sync, and the sanitizer rebuilds the mirror
/// from the strings on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Canonical encoding of `data.source_handle`.
    pub source_handle: String,
    /// Canonical encoding of `data.target_handle`.
    pub target_handle: String,
    #[serde(default)]
    pub data: EdgeData,
}

impl Edge {
    /// Builds an edge from typed handles, deriving the endpoint ids, the
    /// encoded handle strings, and the deterministic edge id.
    pub fn new(source_handle: SourceHandle, target_handle: TargetHandle) -> Self {
        let source = source_handle.id.clone();
        let target = target_handle.id.clone();
        let encoded_source = source_handle.encode();
        let encoded_target = target_handle.encode();
        Edge {
            id: derive_edge_id(&source, &encoded_source, &target, &encoded_target),
            source,
            target,
            source_handle: encoded_source,
            target_handle: encoded_target,
            data: EdgeData {
                source_handle,
                target_handle,
            },
        }
    }

    /// Replaces the source handle, keeping the encoded string in sync.
    /// Does not touch `source` or `id`; callers redirecting an edge update
    /// those explicitly.
    pub fn set_source_handle(&mut self, handle: SourceHandle) {
        self.source_handle = handle.encode();
        self.data.source_handle = handle;
    }

    /// Replaces the target handle, keeping the encoded string in sync.
    pub fn set_target_handle(&mut self, handle: TargetHandle) {
        self.target_handle = handle.encode();
        self.data.target_handle = handle;
    }

    /// Recomputes the deterministic id from the current endpoints and
    /// encoded handles.
    pub fn rederive_id(&mut self) {
        self.id = derive_edge_id(
            &self.source,
            &self.source_handle,
            &self.target,
            &self.target_handle,
        );
    }
}
