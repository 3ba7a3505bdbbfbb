//! Error types for the chat completion client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Chat completion client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, unusable HTTP client settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, empty choice list)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// Whether the request never got a usable answer because of the transport.
    pub fn is_network(&self) -> bool {
        matches!(self, OpenAIError::Network(_))
    }
}
