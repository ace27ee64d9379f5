//! Error types for the MCP adapter

use ark_domain::CoreError;
use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur when talking to an MCP server
#[derive(Error, Debug)]
pub enum McpError {
    #[error("MCP transport error: {0}")]
    Transport(String),

    #[error("MCP server returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("JSON-RPC error (code {code}): {message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for McpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            McpError::Timeout
        } else {
            McpError::Transport(err.to_string())
        }
    }
}

impl From<McpError> for CoreError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::Cancelled => CoreError::Cancelled,
            McpError::Transport(_) | McpError::Timeout => CoreError::Transport(err.to_string()),
            _ => CoreError::Protocol(err.to_string()),
        }
    }
}
