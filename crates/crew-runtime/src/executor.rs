//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response

use crew_core::Result;
use crew_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use crew_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gpt-4o".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
///
/// The AgentExecutor orchestrates the interaction between an LLM provider
/// and a tool registry, implementing the agent loop pattern.
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Execute the agent loop with a user instruction
    ///
    /// # Arguments
    ///
    /// * `user_message` - The instruction for this run
    ///
    /// # Returns
    ///
    /// The final response from the agent after all tool calls are complete
    pub async fn run(&self, user_message: String) -> Result<String> {
        let mut conversation = vec![Message::user(user_message)];
        let mut iteration = 0;

        loop {
            iteration += 1;
            if iteration > self.config.max_iterations {
                warn!(
                    "Max iterations ({}) reached, stopping",
                    self.config.max_iterations
                );
                return Err(crew_core::Error::ProcessingFailed(format!(
                    "agent loop exceeded {} iterations without completing",
                    self.config.max_iterations
                )));
            }

            debug!(
                "Agent iteration {}/{}",
                iteration, self.config.max_iterations
            );

            // Build tool definitions from registry
            let tools = self.build_tool_definitions();

            // Call LLM
            let mut request_builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(
                    self.config
                        .system_prompt
                        .clone()
                        .unwrap_or_else(|| "You are a helpful assistant.".to_string()),
                )
                .max_tokens(self.config.max_tokens);

            if let Some(temperature) = self.config.temperature {
                request_builder = request_builder.temperature(temperature);
            }

            // Only add tools if we have any
            if !tools.is_empty() {
                request_builder = request_builder.tools(tools);
            }

            let request = request_builder.build();

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| crew_core::Error::ProcessingFailed(e.to_string()))?;

            debug!(
                "LLM response - stop_reason: {:?}, tokens: {:?}",
                response.stop_reason, response.usage
            );

            // Add assistant message to conversation
            conversation.push(response.message.clone());

            // Check stop reason
            match response.stop_reason {
                StopReason::EndTurn => {
                    // Natural completion, extract text and return
                    debug!("Agent completed naturally");
                    let text = response.message.text().unwrap_or_default().to_string();
                    return Ok(text);
                }

                StopReason::ToolUse => {
                    // Extract and execute tool calls
                    debug!("Agent requested tool use");
                    let tool_results = self.execute_tools(&response.message).await?;

                    if tool_results.is_empty() {
                        warn!("No tool results despite ToolUse stop reason");
                        return Err(crew_core::Error::ProcessingFailed(
                            "tool use requested but no tool call could be executed".to_string(),
                        ));
                    }

                    // Add tool results to conversation
                    for result in tool_results {
                        conversation.push(result);
                    }

                    // Continue loop
                    continue;
                }

                StopReason::MaxTokens => {
                    // Return whatever text was produced before the cut-off
                    warn!("Hit max tokens in LLM response");
                    let text = response.message.text().unwrap_or_default().to_string();
                    return Ok(text);
                }
            }
        }
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute tool calls from an assistant message
    async fn execute_tools(&self, message: &Message) -> Result<Vec<Message>> {
        let mut results = Vec::new();

        // Extract tool uses
        let tool_uses = message.tool_uses();
        debug!("Executing {} tool(s)", tool_uses.len());

        for tool_use in tool_uses {
            if let ContentBlock::ToolUse { id, name, input } = tool_use {
                info!("Executing tool: {}", name);

                // Get tool from registry
                let tool = self.tool_registry.get(name).ok_or_else(|| {
                    crew_core::Error::ProcessingFailed(format!("Tool not found: {name}"))
                })?;

                // Execute tool
                match tool.execute(input.clone()).await {
                    Ok(result) => {
                        debug!("Tool {} succeeded", name);
                        // String results pass through as-is, structured
                        // results are serialized
                        let result_str = match result {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };

                        results.push(Message::tool_result(id.clone(), result_str));
                    }
                    Err(e) => {
                        warn!("Tool {} execution failed: {}", name, e);
                        // Return error as tool result
                        results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                    }
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crew_llm::{CompletionResponse, MessageContent, Role, TokenUsage};
    use serde_json::Value;
    use std::sync::Mutex;

    /// Provider that replays a scripted sequence of responses
    struct ScriptedProvider {
        responses: Mutex<Vec<CompletionResponse>>,
    }

    impl ScriptedProvider {
        fn new(mut responses: Vec<CompletionResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> crew_llm::Result<CompletionResponse> {
            self.responses
                .lock()
                .expect("scripted provider lock poisoned")
                .pop()
                .ok_or_else(|| crew_llm::LLMError::RequestFailed("script exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct FixedTool {
        output: String,
    }

    #[async_trait]
    impl crew_tools::Tool for FixedTool {
        async fn execute(&self, _params: Value) -> crew_core::Result<Value> {
            Ok(Value::String(self.output.clone()))
        }

        fn name(&self) -> &str {
            "get_holdings"
        }

        fn description(&self) -> &str {
            "Fetch stock holdings"
        }

        fn input_schema(&self) -> Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }
    }

    fn text_response(text: &str, stop_reason: StopReason) -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Text(text.to_string())),
            },
            stop_reason,
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        }
    }

    fn tool_use_response(name: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: name.to_string(),
                    input: serde_json::json!({}),
                }])),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        }
    }

    #[tokio::test]
    async fn test_run_completes_without_tools() {
        let provider = Arc::new(ScriptedProvider::new(vec![text_response(
            "All done",
            StopReason::EndTurn,
        )]));
        let executor = AgentExecutor::new(
            provider,
            Arc::new(ToolRegistry::new()),
            ExecutorConfig::default(),
        );

        let output = executor.run("Do the thing".to_string()).await.unwrap();
        assert_eq!(output, "All done");
    }

    #[tokio::test]
    async fn test_run_executes_tool_then_completes() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_use_response("get_holdings"),
            text_response("Holdings: INFY, TCS", StopReason::EndTurn),
        ]));

        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(FixedTool {
            output: "INFY, TCS".to_string(),
        }));

        let executor = AgentExecutor::new(provider, registry, ExecutorConfig::default());

        let output = executor
            .run("Show my current stock holdings.".to_string())
            .await
            .unwrap();
        assert_eq!(output, "Holdings: INFY, TCS");
    }

    #[tokio::test]
    async fn test_run_fails_after_max_iterations() {
        // The model keeps asking for the tool forever
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_use_response("get_holdings"),
            tool_use_response("get_holdings"),
            tool_use_response("get_holdings"),
        ]));

        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(FixedTool {
            output: "INFY".to_string(),
        }));

        let config = ExecutorConfig {
            max_iterations: 2,
            ..ExecutorConfig::default()
        };
        let executor = AgentExecutor::new(provider, registry, config);

        let err = executor.run("loop".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("exceeded 2 iterations"));
    }

    #[tokio::test]
    async fn test_run_fails_on_unknown_tool() {
        let provider = Arc::new(ScriptedProvider::new(vec![tool_use_response("missing")]));
        let executor = AgentExecutor::new(
            provider,
            Arc::new(ToolRegistry::new()),
            ExecutorConfig::default(),
        );

        let err = executor.run("go".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("Tool not found"));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.model, "gpt-4o");
    }
}
