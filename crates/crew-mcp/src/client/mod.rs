//! MCP client trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::Result;

pub mod sse;

pub use sse::SseClient;

/// MCP client trait - abstracts over the transport
///
/// Note: All methods use &self (not &mut self) to enable use through Arc.
/// Implementations use interior mutability for state changes.
///
/// The pipelines only consume tools, so the surface is the tool subset of the
/// protocol: connect/disconnect, tools/list, and tools/call.
#[async_trait]
pub trait McpClient: Send + Sync {
    /// Initialize connection to the MCP server
    async fn connect(&self) -> Result<()>;

    /// Check if client is connected
    async fn is_connected(&self) -> bool;

    /// Disconnect from the server
    async fn disconnect(&self) -> Result<()>;

    /// List available tools
    async fn list_tools(&self) -> Result<Vec<McpToolDefinition>>;

    /// Call a tool
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult>;

    /// Get server info (from initialize response)
    async fn server_info(&self) -> Option<McpServerInfo>;
}

/// MCP tool definition (from tools/list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value, // JSON Schema
}

/// MCP tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    pub content: Vec<McpContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    pub is_error: Option<bool>,
}

impl McpToolResult {
    /// Flatten the textual content blocks into a single string
    ///
    /// Non-text blocks are skipped; the pipelines treat every tool result as
    /// an opaque text blob.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                McpContent::Text { text } => Some(text.as_str()),
                McpContent::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// MCP content block
///
/// Only text content is consumed; other block types (images, resources) are
/// preserved as an opaque marker so deserialization never fails on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpContent {
    Text {
        text: String,
    },
    #[serde(other, rename = "other")]
    Other,
}

/// MCP server info (from initialize)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerInfo {
    pub name: String,
    pub version: String,
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
}

/// Type alias for Arc-wrapped MCP client
pub type ArcMcpClient = Arc<dyn McpClient>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_deserialization() {
        let json = serde_json::json!({
            "name": "get_holdings",
            "description": "Fetch stock holdings",
            "inputSchema": { "type": "object", "properties": {} }
        });

        let def: McpToolDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(def.name, "get_holdings");
        assert_eq!(def.description.as_deref(), Some("Fetch stock holdings"));
    }

    #[test]
    fn test_tool_result_text_flattening() {
        let result = McpToolResult {
            content: vec![
                McpContent::Text {
                    text: "First line".to_string(),
                },
                McpContent::Text {
                    text: "Second line".to_string(),
                },
            ],
            is_error: None,
        };

        assert_eq!(result.text(), "First line\nSecond line");
    }

    #[test]
    fn test_unknown_content_type_tolerated() {
        let json = serde_json::json!({
            "content": [
                { "type": "image", "data": "...", "mimeType": "image/png" },
                { "type": "text", "text": "Holdings table" }
            ]
        });

        let result: McpToolResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.text(), "Holdings table");
    }
}
