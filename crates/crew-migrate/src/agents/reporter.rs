//! Migration report generator agent

use crate::config::MigrateConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::agents::SimpleAgent;
use crew_runtime::{AgentProfile, AgentRuntime, SimpleConfig};

/// Agent that compiles all findings into the final migration report
pub struct ReporterAgent {
    agent: SimpleAgent,
}

impl ReporterAgent {
    /// Create a new reporter agent
    pub fn new(runtime: &AgentRuntime, config: &MigrateConfig) -> Self {
        let profile = AgentProfile::new(
            "Migration Report Generator",
            "Summarize all findings into a comprehensive migration report",
            "Expert in compiling multi-step outputs into a developer-ready plan.",
        );

        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: profile.system_prompt(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "reporter-agent");

        Self { agent }
    }
}

#[async_trait]
impl Agent for ReporterAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "ReporterAgent"
    }
}
