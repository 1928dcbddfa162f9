//! OpenAI provider implementation
//!
//! This module implements the LLMProvider trait for OpenAI's GPT models.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! The chat/completions dialect carries tool calls on the assistant message
//! (`tool_calls`) and tool results as `role: "tool"` messages; this module
//! translates between that shape and the content-block model in
//! [`crate::messages`].

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMProvider, Message, MessageContent,
    Result, Role, StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the OpenAI API (default: "https://api.openai.com/v1")
    /// Can be customized for OpenAI-compatible APIs
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`, and the base URL from
    /// `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            crate::LLMError::ConfigurationError(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// OpenAI provider
///
/// Supports GPT models including gpt-4o, gpt-4-turbo, and gpt-3.5-turbo,
/// plus OpenAI-compatible APIs through a custom `api_base`.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new OpenAI provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Create a provider from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`; `OPENAI_API_BASE` overrides
    /// the endpoint when set.
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env()?)
    }

    /// Convert a request into the chat/completions message array
    fn build_wire_messages(request: &CompletionRequest) -> Vec<Value> {
        let mut wire = Vec::new();

        if let Some(system) = &request.system {
            wire.push(json!({ "role": "system", "content": system }));
        }

        for message in &request.messages {
            match (&message.role, &message.content) {
                (Role::System, _) => {
                    if let Some(text) = message.text() {
                        wire.push(json!({ "role": "system", "content": text }));
                    }
                }
                (Role::User, Some(MessageContent::Text(text))) => {
                    wire.push(json!({ "role": "user", "content": text }));
                }
                (Role::User, Some(MessageContent::Blocks(blocks))) => {
                    for block in blocks {
                        match block {
                            ContentBlock::ToolResult {
                                tool_use_id,
                                content,
                                ..
                            } => {
                                wire.push(json!({
                                    "role": "tool",
                                    "tool_call_id": tool_use_id,
                                    "content": content,
                                }));
                            }
                            ContentBlock::Text { text } => {
                                wire.push(json!({ "role": "user", "content": text }));
                            }
                            ContentBlock::ToolUse { .. } => {}
                        }
                    }
                }
                (Role::Assistant, Some(MessageContent::Text(text))) => {
                    wire.push(json!({ "role": "assistant", "content": text }));
                }
                (Role::Assistant, Some(MessageContent::Blocks(blocks))) => {
                    let mut text_parts = Vec::new();
                    let mut tool_calls = Vec::new();

                    for block in blocks {
                        match block {
                            ContentBlock::Text { text } => text_parts.push(text.clone()),
                            ContentBlock::ToolUse { id, name, input } => {
                                tool_calls.push(json!({
                                    "id": id,
                                    "type": "function",
                                    "function": {
                                        "name": name,
                                        "arguments": input.to_string(),
                                    },
                                }));
                            }
                            ContentBlock::ToolResult { .. } => {}
                        }
                    }

                    let mut entry = json!({ "role": "assistant" });
                    entry["content"] = if text_parts.is_empty() {
                        Value::Null
                    } else {
                        Value::String(text_parts.join("\n"))
                    };
                    if !tool_calls.is_empty() {
                        entry["tool_calls"] = Value::Array(tool_calls);
                    }
                    wire.push(entry);
                }
                (_, None) => {}
            }
        }

        wire
    }

    /// Convert a chat/completions choice into our message format
    fn convert_choice(choice: ChatChoice) -> (Message, StopReason) {
        let mut blocks = Vec::new();

        if let Some(text) = choice.message.content {
            if !text.is_empty() {
                blocks.push(ContentBlock::Text { text });
            }
        }

        let mut has_tool_calls = false;
        for call in choice.message.tool_calls.unwrap_or_default() {
            has_tool_calls = true;
            let input: Value =
                serde_json::from_str(&call.function.arguments).unwrap_or_else(|_| json!({}));
            blocks.push(ContentBlock::ToolUse {
                id: call.id,
                name: call.function.name,
                input,
            });
        }

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("tool_calls") => StopReason::ToolUse,
            Some("length") => StopReason::MaxTokens,
            _ if has_tool_calls => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        };

        let message = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        };

        (message, stop_reason)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to OpenAI chat/completions API");

        let messages = Self::build_wire_messages(&request);
        let mut body = json!({
            "model": request.model.clone(),
            "messages": messages,
            "max_tokens": request.max_tokens,
        });

        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        if let Some(tools) = &request.tools {
            body["tools"] = Value::Array(
                tools
                    .iter()
                    .map(|tool| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": tool.name,
                                "description": tool.description,
                                "parameters": tool.input_schema,
                            },
                        })
                    })
                    .collect(),
            );
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LLMError::AuthenticationFailed,
                429 => crate::LLMError::RateLimitExceeded(error_text),
                400 => crate::LLMError::InvalidRequest(error_text),
                404 => crate::LLMError::ModelNotFound(request.model),
                _ => crate::LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            crate::LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let usage = chat_response.usage.unwrap_or_default();
        debug!(
            "Received response - tokens: {}/{}",
            usage.prompt_tokens, usage.completion_tokens
        );

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| crate::LLMError::UnexpectedResponse("No choices returned".to_string()))?;

        let (message, stop_reason) = Self::convert_choice(choice);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI-specific response types
// These match the chat/completions API format exactly

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize, Default)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolDefinition;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "openai");
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAIConfig::new("sk-test")
            .with_api_base("http://localhost:8000/v1")
            .with_timeout(60);

        assert_eq!(config.api_base, "http://localhost:8000/v1");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_wire_messages_with_system() {
        let request = CompletionRequest::builder("gpt-4o")
            .system("You are a helpful assistant")
            .add_message(Message::user("Hello"))
            .build();

        let wire = OpenAIProvider::build_wire_messages(&request);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0]["role"], "system");
        assert_eq!(wire[1]["role"], "user");
        assert_eq!(wire[1]["content"], "Hello");
    }

    #[test]
    fn test_wire_messages_tool_round_trip() {
        let assistant = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "login".to_string(),
                input: json!({}),
            }])),
        };
        let result = Message::tool_result("call_1".to_string(), "ok".to_string());

        let request = CompletionRequest::builder("gpt-4o")
            .messages(vec![Message::user("Log in"), assistant, result])
            .tools(vec![ToolDefinition::new("login", "Login tool", json!({}))])
            .build();

        let wire = OpenAIProvider::build_wire_messages(&request);
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[1]["tool_calls"][0]["function"]["name"], "login");
        assert_eq!(wire[2]["role"], "tool");
        assert_eq!(wire[2]["tool_call_id"], "call_1");
    }

    #[test]
    fn test_convert_choice_tool_calls() {
        let choice = ChatChoice {
            message: ChatChoiceMessage {
                content: None,
                tool_calls: Some(vec![ChatToolCall {
                    id: "call_9".to_string(),
                    function: ChatFunctionCall {
                        name: "get_holdings".to_string(),
                        arguments: "{}".to_string(),
                    },
                }]),
            },
            finish_reason: Some("tool_calls".to_string()),
        };

        let (message, stop_reason) = OpenAIProvider::convert_choice(choice);
        assert_eq!(stop_reason, StopReason::ToolUse);
        assert!(message.has_tool_uses());
    }

    #[test]
    fn test_convert_choice_text() {
        let choice = ChatChoice {
            message: ChatChoiceMessage {
                content: Some("The report".to_string()),
                tool_calls: None,
            },
            finish_reason: Some("stop".to_string()),
        };

        let (message, stop_reason) = OpenAIProvider::convert_choice(choice);
        assert_eq!(stop_reason, StopReason::EndTurn);
        assert_eq!(message.text(), Some("The report"));
    }
}
