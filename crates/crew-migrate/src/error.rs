//! Error types for the migration review pipeline

use thiserror::Error;

/// Migration review errors
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// LLM provider failed
    #[error("LLM error: {0}")]
    LlmError(#[from] crew_llm::LLMError),

    /// Agent or pipeline execution failed
    #[error("Agent error: {0}")]
    AgentError(#[from] crew_core::Error),

    /// Prompt template failed
    #[error("Prompt error: {0}")]
    PromptError(#[from] crew_prompt::PromptError),

    /// Reading the legacy source failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Convert MigrateError to crew_core::Error
impl From<MigrateError> for crew_core::Error {
    fn from(err: MigrateError) -> Self {
        crew_core::Error::ProcessingFailed(err.to_string())
    }
}
