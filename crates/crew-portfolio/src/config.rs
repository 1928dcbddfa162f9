//! Configuration for the portfolio pipeline

use crate::error::{PortfolioError, Result};
use crew_mcp::SseEndpoint;
use serde::{Deserialize, Serialize};

/// Default model for the pipeline agents
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for a portfolio analysis run
///
/// All values come from the environment at process start; a missing
/// `OPENAI_API_KEY` fails here, before any network activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// OpenAI API key
    pub openai_api_key: String,

    /// Model used by every agent in the pipeline
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// SSE MCP endpoint (brokerage default, `MCP_SSE_URL` override)
    pub endpoint: SseEndpoint,
}

impl PortfolioConfig {
    /// Create a new configuration builder
    pub fn builder() -> PortfolioConfigBuilder {
        PortfolioConfigBuilder::default()
    }

    /// Load the full configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not set or the endpoint URL
    /// is invalid
    pub fn from_env() -> Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            PortfolioError::ConfigError(
                "Missing OPENAI_API_KEY. Set it in your environment or .env file.".to_string(),
            )
        })?;

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::builder()
            .openai_api_key(openai_api_key)
            .model(model)
            .endpoint(SseEndpoint::from_env())
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            return Err(PortfolioError::ConfigError(
                "OPENAI_API_KEY must not be empty".to_string(),
            ));
        }

        self.endpoint.validate()?;
        Ok(())
    }
}

/// Builder for PortfolioConfig
#[derive(Debug, Default)]
pub struct PortfolioConfigBuilder {
    openai_api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    endpoint: Option<SseEndpoint>,
}

impl PortfolioConfigBuilder {
    /// Set the OpenAI API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the MCP endpoint
    pub fn endpoint(mut self, endpoint: SseEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PortfolioConfig> {
        let config = PortfolioConfig {
            openai_api_key: self.openai_api_key.unwrap_or_default(),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(4096),
            temperature: self.temperature.unwrap_or(0.7),
            endpoint: self.endpoint.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
