//! Validation predicates and error reporting.
//!
//! All validators are pure and synchronous so the editor can gate UI
//! interactions with them directly: connection validity returns a boolean,
//! node and selection validation return human-readable message lists meant
//! for direct display.

mod connection;
mod node;
mod selection;

pub use connection::is_valid_connection;
pub use node::{has_duplicate_keys, has_empty_key, validate_graph, validate_node};
pub use selection::validate_selection;
