//! Java compatibility checker agent

use crate::config::MigrateConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::agents::SimpleAgent;
use crew_runtime::{AgentProfile, AgentRuntime, SimpleConfig};

/// Agent that checks findings for Java 17 compatibility issues
pub struct CompatibilityAgent {
    agent: SimpleAgent,
}

impl CompatibilityAgent {
    /// Create a new compatibility agent
    pub fn new(runtime: &AgentRuntime, config: &MigrateConfig) -> Self {
        let profile = AgentProfile::new(
            "Java Compatibility Checker",
            "Identify compatibility issues with Java 17+ and suggest upgrades",
            "Knows what to ask and how to reason through compatibility issues.",
        );

        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: profile.system_prompt(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "compatibility-agent");

        Self { agent }
    }
}

#[async_trait]
impl Agent for CompatibilityAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "CompatibilityAgent"
    }
}
