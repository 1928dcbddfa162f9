//! McpTool wrapper that implements the Tool trait

use async_trait::async_trait;
use crew_tools::Tool;
use serde_json::Value;
use std::sync::Arc;

use crate::client::{ArcMcpClient, McpToolDefinition};

/// Wrapper that implements `crew_tools::Tool` for remote MCP tools
///
/// This wrapper bridges MCP tools into the crew-rs tool system by:
/// - Implementing the `Tool` trait from crew-tools
/// - Delegating execution to the MCP client
/// - Flattening MCP text content into a single result string
pub struct McpTool {
    /// Tool definition from the server (name, description, schema)
    definition: McpToolDefinition,

    /// Client used to call the tool
    client: ArcMcpClient,
}

impl McpTool {
    /// Create a new McpTool
    ///
    /// # Arguments
    ///
    /// * `definition` - Tool definition from tools/list
    /// * `client` - Client to route tool calls through
    pub fn new(definition: McpToolDefinition, client: ArcMcpClient) -> Self {
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for McpTool {
    async fn execute(&self, params: Value) -> crew_core::Result<Value> {
        let result = self
            .client
            .call_tool(&self.definition.name, params)
            .await
            .map_err(|e| {
                crew_core::Error::ProcessingFailed(format!("MCP tool call failed: {e}"))
            })?;

        // Check if the tool returned an error
        if result.is_error.unwrap_or(false) {
            return Err(crew_core::Error::ProcessingFailed(format!(
                "MCP tool '{}' returned error: {}",
                self.definition.name,
                result.text()
            )));
        }

        Ok(Value::String(result.text()))
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    fn description(&self) -> &str {
        self.definition
            .description
            .as_deref()
            .unwrap_or("No description available")
    }

    fn input_schema(&self) -> Value {
        self.definition.input_schema.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{McpClient, McpContent, McpServerInfo, McpToolResult};
    use crate::Result;

    struct StubClient {
        result: McpToolResult,
    }

    #[async_trait]
    impl McpClient for StubClient {
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
            Ok(vec![])
        }

        async fn call_tool(&self, _name: &str, _arguments: Value) -> Result<McpToolResult> {
            Ok(self.result.clone())
        }

        async fn server_info(&self) -> Option<McpServerInfo> {
            None
        }
    }

    fn login_definition() -> McpToolDefinition {
        McpToolDefinition {
            name: "login".to_string(),
            description: Some("Authenticate with the brokerage".to_string()),
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
        }
    }

    #[tokio::test]
    async fn test_execute_flattens_text() {
        let client = Arc::new(StubClient {
            result: McpToolResult {
                content: vec![McpContent::Text {
                    text: "Open [login](https://kite.example/login)".to_string(),
                }],
                is_error: None,
            },
        });

        let tool = McpTool::new(login_definition(), client);
        let value = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(
            value,
            Value::String("Open [login](https://kite.example/login)".to_string())
        );
    }

    #[tokio::test]
    async fn test_execute_surfaces_tool_error() {
        let client = Arc::new(StubClient {
            result: McpToolResult {
                content: vec![McpContent::Text {
                    text: "session expired".to_string(),
                }],
                is_error: Some(true),
            },
        });

        let tool = McpTool::new(login_definition(), client);
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(err.to_string().contains("session expired"));
    }

    #[test]
    fn test_tool_metadata() {
        let client = Arc::new(StubClient {
            result: McpToolResult {
                content: vec![],
                is_error: None,
            },
        });

        let tool = McpTool::new(login_definition(), client);
        assert_eq!(tool.name(), "login");
        assert_eq!(tool.description(), "Authenticate with the brokerage");
        assert!(tool.input_schema().is_object());
    }

    #[test]
    fn test_missing_description_fallback() {
        let client = Arc::new(StubClient {
            result: McpToolResult {
                content: vec![],
                is_error: None,
            },
        });

        let definition = McpToolDefinition {
            name: "get_holdings".to_string(),
            description: None,
            input_schema: serde_json::json!({}),
        };

        let tool = McpTool::new(definition, client);
        assert_eq!(tool.description(), "No description available");
    }
}
