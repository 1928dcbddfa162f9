//! Analyst agent
//!
//! LLM-only. Its instruction arrives fully assembled (the analysis prompt
//! with the raw holdings embedded), so a single completion call suffices.

use crate::config::PortfolioConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::agents::SimpleAgent;
use crew_runtime::{AgentProfile, AgentRuntime, SimpleConfig};

/// Agent that writes the portfolio analysis report
pub struct AnalystAgent {
    agent: SimpleAgent,
}

impl AnalystAgent {
    /// Create a new analyst agent
    pub fn new(runtime: &AgentRuntime, config: &PortfolioConfig) -> Self {
        let profile = AgentProfile::new(
            "Portfolio Analysis Assistant",
            "Parse the raw stock holdings output and generate a full portfolio analysis report.",
            "Expert in financial data extraction and analysis.",
        );

        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: profile.system_prompt(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "analyst-agent");

        Self { agent }
    }
}

#[async_trait]
impl Agent for AnalystAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "AnalystAgent"
    }
}
