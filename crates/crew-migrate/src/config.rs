//! Configuration for the migration review pipeline

use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default model for the review agents
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default path of the legacy source file under review
pub const DEFAULT_SOURCE_PATH: &str = "legacy_app/Main.java";

/// Configuration for a migration review run
///
/// All values come from the environment at process start; a missing
/// `GEMINI_API_KEY` fails here, before any network activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Model used by every agent in the pipeline
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Path of the legacy Java source file under review
    pub source_path: PathBuf,
}

impl MigrateConfig {
    /// Create a new configuration builder
    pub fn builder() -> MigrateConfigBuilder {
        MigrateConfigBuilder::default()
    }

    /// Load the full configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            MigrateError::ConfigError(
                "Missing GEMINI_API_KEY. Set it in your environment or .env file.".to_string(),
            )
        })?;

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let source_path = std::env::var("LEGACY_SOURCE_PATH")
            .unwrap_or_else(|_| DEFAULT_SOURCE_PATH.to_string());

        Self::builder()
            .gemini_api_key(gemini_api_key)
            .model(model)
            .source_path(source_path)
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(MigrateError::ConfigError(
                "GEMINI_API_KEY must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MigrateConfig
#[derive(Debug, Default)]
pub struct MigrateConfigBuilder {
    gemini_api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    source_path: Option<PathBuf>,
}

impl MigrateConfigBuilder {
    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
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

    /// Set the source file path
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MigrateConfig> {
        let config = MigrateConfig {
            gemini_api_key: self.gemini_api_key.unwrap_or_default(),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(4096),
            temperature: self.temperature.unwrap_or(0.7),
            source_path: self
                .source_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH)),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MigrateConfig::builder()
            .gemini_api_key("test-key")
            .build()
            .unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = MigrateConfig::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_source_path() {
        let config = MigrateConfig::builder()
            .gemini_api_key("test-key")
            .source_path("src/Legacy.java")
            .build()
            .unwrap();

        assert_eq!(config.source_path, PathBuf::from("src/Legacy.java"));
    }
}
