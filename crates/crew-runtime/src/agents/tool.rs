//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};

/// An agent that uses the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface
/// while supporting tool execution in an LLM loop. The login and holdings
/// stages use it: each is bound to a single named remote capability and the
/// loop runs until the model produces its final text.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    ///
    /// # Arguments
    ///
    /// * `executor` - The agent executor to wrap
    /// * `name` - Name of the agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        // Delegate to the executor's run method
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
