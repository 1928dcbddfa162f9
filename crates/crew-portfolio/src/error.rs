//! Error types for the portfolio pipeline

use thiserror::Error;

/// Portfolio pipeline errors
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// MCP connection or tool call failed
    #[error("MCP error: {0}")]
    McpError(#[from] crew_mcp::MCPError),

    /// LLM provider failed
    #[error("LLM error: {0}")]
    LlmError(#[from] crew_llm::LLMError),

    /// Agent or pipeline execution failed
    #[error("Agent error: {0}")]
    AgentError(#[from] crew_core::Error),

    /// Prompt template failed
    #[error("Prompt error: {0}")]
    PromptError(#[from] crew_prompt::PromptError),

    /// Terminal or browser interaction failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Convert PortfolioError to crew_core::Error
impl From<PortfolioError> for crew_core::Error {
    fn from(err: PortfolioError) -> Self {
        crew_core::Error::ProcessingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::ConfigError("OPENAI_API_KEY not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: OPENAI_API_KEY not set"
        );
    }
}
