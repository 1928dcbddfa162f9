//! Refactor advisor agent

use crate::config::MigrateConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::agents::SimpleAgent;
use crew_runtime::{AgentProfile, AgentRuntime, SimpleConfig};

/// Agent that proposes modern-Java refactorings for the findings
pub struct RefactorAgent {
    agent: SimpleAgent,
}

impl RefactorAgent {
    /// Create a new refactor agent
    pub fn new(runtime: &AgentRuntime, config: &MigrateConfig) -> Self {
        let profile = AgentProfile::new(
            "Refactor Advisor",
            "Provide modern refactoring suggestions for the identified issues",
            "Knows modern Java practices and how to present code improvements.",
        );

        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: profile.system_prompt(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "refactor-agent");

        Self { agent }
    }
}

#[async_trait]
impl Agent for RefactorAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "RefactorAgent"
    }
}
