//! Error types for MCP operations

use thiserror::Error;

/// Errors that can occur during MCP operations
#[derive(Error, Debug)]
pub enum MCPError {
    /// MCP connection failed
    #[error("MCP connection failed: {0}")]
    ConnectionFailed(String),

    /// MCP initialization failed
    #[error("MCP initialization failed: {0}")]
    InitializationFailed(String),

    /// Not connected to MCP server
    #[error("Not connected to MCP server")]
    NotConnected,

    /// MCP request failed
    #[error("MCP request failed: {0}")]
    RequestFailed(String),

    /// MCP request timed out waiting for a response on the event stream
    #[error("MCP request timed out: {0}")]
    RequestTimeout(String),

    /// MCP tool call failed
    #[error("MCP tool call failed: {0}")]
    ToolCallFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convert MCPError to crew_core::Error
impl From<MCPError> for crew_core::Error {
    fn from(err: MCPError) -> Self {
        crew_core::Error::ProcessingFailed(err.to_string())
    }
}
