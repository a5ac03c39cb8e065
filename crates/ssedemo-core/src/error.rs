// Error types for stream generation

use thiserror::Error;

/// Result type alias for stream operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors that can occur while producing stream items
#[derive(Debug, Error)]
pub enum StreamError {
    /// Payload could not be encoded as JSON
    #[error("Failed to encode {kind} payload: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StreamError {
    /// Create an encoding error for the given payload kind
    pub fn encode(kind: &'static str, source: serde_json::Error) -> Self {
        StreamError::Encode { kind, source }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        StreamError::Configuration(msg.into())
    }
}
