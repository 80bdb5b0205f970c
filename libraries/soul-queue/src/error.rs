//! Error types for queue state handling

use thiserror::Error;

/// Queue errors
///
/// The reducer itself is total; these only surface at the edges where
/// untyped input (JSON commands, configuration sources) is turned into
/// typed values.
#[derive(Debug, Error)]
pub enum QueueError {
    /// A command payload could not be decoded
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// State could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
