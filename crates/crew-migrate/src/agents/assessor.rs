//! Legacy code assessor agent
//!
//! The only tool user in the pipeline: reads the source file through
//! `read_source` and lists the legacy constructs it finds.

use crate::config::MigrateConfig;
use crate::tools::SOURCE_TOOL;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::agents::ToolAgent;
use crew_runtime::{AgentProfile, AgentRuntime, ExecutorConfig};

/// Agent that assesses the legacy source for deprecated constructs
pub struct AssessorAgent {
    agent: ToolAgent,
}

impl AssessorAgent {
    /// Create a new assessor agent
    ///
    /// # Errors
    ///
    /// Fails if the `read_source` tool is not registered
    pub fn new(runtime: &AgentRuntime, config: &MigrateConfig) -> Result<Self> {
        let profile = AgentProfile::new(
            "Legacy Code Assessor",
            "Identify deprecated constructs in Java code",
            "Expert in legacy Java analysis for modernization planning.",
        );

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(profile.system_prompt()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 5,
        };

        let agent =
            runtime.create_tool_agent_with_tools(executor_config, "assessor-agent", &[SOURCE_TOOL])?;

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for AssessorAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "AssessorAgent"
    }
}
