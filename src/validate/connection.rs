use crate::graph::Graph;
use crate::handle::{decode_target_handle, SourceHandle, TargetHandle};

/// The universal acceptor: a field of this type takes any source.
const GENERIC_STRING_TYPE: &str = "str";

/// Decides whether a proposed connection is type-compatible and
/// structurally legal against the current graph.
///
/// Type compatibility requires at least one of: the source's data type is
/// among the target field's accepted input types; one of the source's base
/// classes matches an accepted input type or the target field's own type;
/// or the target field is the generic string type.
///
/// Arity: a `list` field accepts unlimited incoming edges; any other field
/// accepts at most one. When the target node or field cannot be resolved
/// (e.g. a not-yet-materialized handle), the connection is allowed only if
/// no existing edge already targets that exact handle.
///
/// Pure predicate; never mutates the graph.
pub fn is_valid_connection(
    source_handle: &SourceHandle,
    target_handle: &TargetHandle,
    graph: &Graph,
) -> bool {
    let accepts = |candidate: &str| {
        target_handle
            .input_types
            .as_ref()
            .is_some_and(|types| types.iter().any(|t| t == candidate))
    };
    let compatible = accepts(&source_handle.data_type)
        || source_handle
            .base_classes
            .iter()
            .any(|class| accepts(class) || *class == target_handle.field_type)
        || target_handle.field_type == GENERIC_STRING_TYPE;
    if !compatible {
        return false;
    }

    // The stored handle string decides occupancy; the optional `data`
    // mirror may be absent in a freshly loaded snapshot.
    let occupied = graph
        .edges
        .iter()
        .any(|edge| decode_target_handle(&edge.target_handle).is_ok_and(|h| h == *target_handle));
    match graph
        .node(&target_handle.id)
        .and_then(|node| node.template.get(&target_handle.field_name))
    {
        Some(field) => field.list || !occupied,
        None => !occupied,
    }
}
