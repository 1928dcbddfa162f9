//! Tool discovery and registration
//!
//! This module discovers tools from a connected MCP server and registers them
//! into a `crew_tools::ToolRegistry`, one `McpTool` wrapper per remote tool.

use crew_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info};

use crate::Result;
use crate::client::ArcMcpClient;
use crate::tool::McpTool;

/// Discover the server's tools and register them into a registry
///
/// # Arguments
///
/// * `client` - Connected MCP client
/// * `registry` - ToolRegistry to register discovered tools into
///
/// # Returns
///
/// Number of tools registered
pub async fn register_server_tools(
    client: ArcMcpClient,
    registry: &ToolRegistry,
) -> Result<usize> {
    let tools = client.list_tools().await?;
    debug!("Found {} tools on MCP server", tools.len());

    let mut registered = 0;
    for definition in tools {
        let name = definition.name.clone();
        registry.register(Arc::new(McpTool::new(definition, client.clone())));
        registered += 1;
        debug!("Registered MCP tool '{name}'");
    }

    info!("Registered {registered} MCP tools into registry");
    Ok(registered)
}

/// Discover tools without registering them
///
/// Useful for printing what the server exposes before wiring agents.
pub async fn list_available_tools(client: ArcMcpClient) -> Result<Vec<String>> {
    let tools = client.list_tools().await?;
    Ok(tools.into_iter().map(|t| t.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{McpClient, McpServerInfo, McpToolDefinition, McpToolResult};
    use async_trait::async_trait;
    use serde_json::Value;

    struct FixedToolsClient;

    #[async_trait]
    impl McpClient for FixedToolsClient {
        async fn connect(&self) -> Result<()> {
            Ok(())
        }

        async fn is_connected(&self) -> bool {
            true
        }

        async fn disconnect(&self) -> Result<()> {
            Ok(())
        }

        async fn list_tools(&self) -> Result<Vec<McpToolDefinition>> {
            Ok(vec![
                McpToolDefinition {
                    name: "login".to_string(),
                    description: None,
                    input_schema: serde_json::json!({}),
                },
                McpToolDefinition {
                    name: "get_holdings".to_string(),
                    description: None,
                    input_schema: serde_json::json!({}),
                },
            ])
        }

        async fn call_tool(&self, _name: &str, _arguments: Value) -> Result<McpToolResult> {
            Ok(McpToolResult {
                content: vec![],
                is_error: None,
            })
        }

        async fn server_info(&self) -> Option<McpServerInfo> {
            None
        }
    }

    #[tokio::test]
    async fn test_register_server_tools() {
        let registry = ToolRegistry::new();
        let count = register_server_tools(Arc::new(FixedToolsClient), &registry)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert!(registry.get("login").is_some());
        assert!(registry.get("get_holdings").is_some());
    }

    #[tokio::test]
    async fn test_list_available_tools() {
        let names = list_available_tools(Arc::new(FixedToolsClient)).await.unwrap();
        assert_eq!(names, vec!["login".to_string(), "get_holdings".to_string()]);
    }
}
