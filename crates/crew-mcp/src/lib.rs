//! Model Context Protocol (MCP) integration for crew-rs
//!
//! This crate provides MCP client support over the HTTP+SSE transport,
//! enabling agents to:
//! - Connect to a remote MCP server via a server-sent event stream
//! - Discover and execute tools exposed by the server
//! - Register those tools into a `crew_tools::ToolRegistry`
//!
//! # Example
//!
//! ```no_run
//! use crew_mcp::client::{McpClient, SseClient};
//! use crew_mcp::config::SseEndpoint;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Read the endpoint (MCP_SSE_URL override, brokerage default)
//! let endpoint = SseEndpoint::from_env();
//!
//! let client = SseClient::new(endpoint);
//! client.connect().await?;
//!
//! let tools = client.list_tools().await?;
//! println!("Discovered {} tools", tools.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod retry;
pub mod tool;

// Re-export commonly used types
pub use client::{McpClient, SseClient};
pub use config::SseEndpoint;
pub use error::MCPError;
pub use retry::RetryPolicy;
pub use tool::McpTool;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
