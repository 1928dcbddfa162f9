//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Agents exchange plain strings: a pipeline stage hands an agent its
/// instruction text and receives the agent's textual answer. Richer LLM
/// message types live in crew-llm; concrete agent implementations translate
/// between the two at their boundary.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process an instruction and return the agent's textual output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Initialize the agent (optional)
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Shutdown the agent (optional)
    async fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
