use thiserror::Error;

/// Errors produced when decoding an encoded handle string.
///
/// Expected conditions (incompatible connections, stale edges, validation
/// findings) are never errors; they are returned as booleans or message
/// lists. These enums cover only malformed input at the codec and snapshot
/// boundaries.
#[derive(Error, Debug, Clone)]
pub enum HandleError {
    #[error("Failed to decode handle '{handle}': {message}")]
    Malformed { handle: String, message: String },
}

/// Errors produced when reading or writing a flow snapshot.
#[derive(Error, Debug, Clone)]
pub enum FlowError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),
}
