//! Simple agent implementation (LLM only, no tools)

use crew_core::{Agent, Context, Result};
use crew_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;

use async_trait::async_trait;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// A simple agent that uses LLM without tools
///
/// SimpleAgent makes exactly one completion call per instruction. The
/// analysis and review stages use it: their instruction already embeds
/// everything the model needs, so no tool loop is involved.
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    ///
    /// # Arguments
    ///
    /// * `provider` - The LLM provider to use
    /// * `config` - Configuration for the agent
    /// * `name` - Name of the agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
        }
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        // Build completion request
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        // Call LLM
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| crew_core::Error::ProcessingFailed(e.to_string()))?;

        // Extract text from response
        Ok(response.message.text().unwrap_or_default().to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.7);
    }
}
