//! Google Gemini provider implementation
//!
//! This module implements the LLMProvider trait for Gemini models through the
//! generateContent API.
//! See: https://ai.google.dev/api/generate-content
//!
//! Gemini correlates function responses by function *name* rather than by a
//! call id, so tool_use ids produced by this provider are the function names
//! and tool_use_ids are sent back as the `functionResponse.name`.

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

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Gemini API
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variable
    ///
    /// Reads the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            crate::LLMError::ConfigurationError(
                "GEMINI_API_KEY environment variable not set".to_string(),
            )
        })?;
        Ok(Self::new(api_key))
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

/// Google Gemini provider
///
/// Supports Gemini models including:
/// - gemini-2.0-flash
/// - gemini-2.5-flash
/// - gemini-2.5-pro
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Convert conversation messages into generateContent `contents`
    fn build_contents(request: &CompletionRequest) -> Vec<Value> {
        let mut contents = Vec::new();

        for message in &request.messages {
            let role = match message.role {
                Role::Assistant => "model",
                // System text is carried via systemInstruction; anything left
                // over rides along as a user turn.
                Role::User | Role::System => "user",
            };

            let parts: Vec<Value> = match &message.content {
                Some(MessageContent::Text(text)) => vec![json!({ "text": text })],
                Some(MessageContent::Blocks(blocks)) => blocks
                    .iter()
                    .map(|block| match block {
                        ContentBlock::Text { text } => json!({ "text": text }),
                        ContentBlock::ToolUse { name, input, .. } => json!({
                            "functionCall": { "name": name, "args": input },
                        }),
                        ContentBlock::ToolResult {
                            tool_use_id,
                            content,
                            ..
                        } => json!({
                            "functionResponse": {
                                "name": tool_use_id,
                                "response": { "content": content },
                            },
                        }),
                    })
                    .collect(),
                None => vec![],
            };

            if !parts.is_empty() {
                contents.push(json!({ "role": role, "parts": parts }));
            }
        }

        contents
    }

    /// Convert a generateContent candidate into our message format
    fn convert_candidate(candidate: GeminiCandidate) -> (Message, StopReason) {
        let mut blocks = Vec::new();
        let mut has_function_call = false;

        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(text) = part.text {
                blocks.push(ContentBlock::Text { text });
            } else if let Some(call) = part.function_call {
                has_function_call = true;
                blocks.push(ContentBlock::ToolUse {
                    id: call.name.clone(),
                    name: call.name,
                    input: call.args.unwrap_or_else(|| json!({})),
                });
            }
        }

        let stop_reason = if has_function_call {
            StopReason::ToolUse
        } else if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") {
            StopReason::MaxTokens
        } else {
            StopReason::EndTurn
        };

        let message = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        };

        (message, stop_reason)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Gemini generateContent API");

        let mut body = json!({
            "contents": Self::build_contents(&request),
            "generationConfig": { "maxOutputTokens": request.max_tokens },
        });

        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        if let Some(temperature) = request.temperature {
            body["generationConfig"]["temperature"] = json!(temperature);
        }

        if let Some(tools) = &request.tools {
            body["tools"] = json!([{
                "functionDeclarations": tools
                    .iter()
                    .map(|tool| json!({
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema,
                    }))
                    .collect::<Vec<_>>(),
            }]);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, request.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => crate::LLMError::AuthenticationFailed,
                429 => crate::LLMError::RateLimitExceeded(error_text),
                400 => crate::LLMError::InvalidRequest(error_text),
                404 => crate::LLMError::ModelNotFound(request.model),
                _ => crate::LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            crate::LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let usage = gemini_response.usage_metadata.unwrap_or_default();
        debug!(
            "Received response - tokens: {}/{}",
            usage.prompt_token_count, usage.candidates_token_count
        );

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| {
                crate::LLMError::UnexpectedResponse("No candidates returned".to_string())
            })?;

        let (message, stop_reason) = Self::convert_candidate(candidate);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini-specific response types
// These match the generateContent API format exactly

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
    #[serde(rename = "functionCall")]
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: usize,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new("test-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "gemini");
    }

    #[test]
    fn test_build_contents_roles() {
        let request = CompletionRequest::builder("gemini-2.0-flash")
            .add_message(Message::user("Assess the code"))
            .add_message(Message::assistant("Found two issues"))
            .build();

        let contents = GeminiProvider::build_contents(&request);
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
    }

    #[test]
    fn test_build_contents_function_response() {
        let result = Message::tool_result("read_source".to_string(), "class Main {}".to_string());
        let request = CompletionRequest::builder("gemini-2.0-flash")
            .messages(vec![result])
            .build();

        let contents = GeminiProvider::build_contents(&request);
        assert_eq!(
            contents[0]["parts"][0]["functionResponse"]["name"],
            "read_source"
        );
    }

    #[test]
    fn test_convert_candidate_function_call() {
        let candidate = GeminiCandidate {
            content: Some(GeminiContent {
                parts: vec![GeminiPart {
                    text: None,
                    function_call: Some(GeminiFunctionCall {
                        name: "read_source".to_string(),
                        args: Some(json!({ "path": "legacy_app/Main.java" })),
                    }),
                }],
            }),
            finish_reason: Some("STOP".to_string()),
        };

        let (message, stop_reason) = GeminiProvider::convert_candidate(candidate);
        assert_eq!(stop_reason, StopReason::ToolUse);
        assert!(message.has_tool_uses());
    }

    #[test]
    fn test_convert_candidate_max_tokens() {
        let candidate = GeminiCandidate {
            content: Some(GeminiContent {
                parts: vec![GeminiPart {
                    text: Some("Truncated".to_string()),
                    function_call: None,
                }],
            }),
            finish_reason: Some("MAX_TOKENS".to_string()),
        };

        let (_, stop_reason) = GeminiProvider::convert_candidate(candidate);
        assert_eq!(stop_reason, StopReason::MaxTokens);
    }
}
