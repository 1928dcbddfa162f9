//! Holdings agent
//!
//! Bound to the remote `get_holdings` tool only. Returns the raw holdings
//! text for the analysis stage to consume untouched.

use crate::config::PortfolioConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::{AgentProfile, AgentRuntime, ExecutorConfig};
use crew_runtime::agents::ToolAgent;

/// Remote capability this agent is bound to
pub const HOLDINGS_TOOL: &str = "get_holdings";

/// Agent that fetches the current stock holdings
pub struct HoldingsAgent {
    agent: ToolAgent,
}

impl HoldingsAgent {
    /// Create a new holdings agent
    ///
    /// # Errors
    ///
    /// Fails if the `get_holdings` tool was not discovered on the MCP server
    pub fn new(runtime: &AgentRuntime, config: &PortfolioConfig) -> Result<Self> {
        let profile = AgentProfile::new(
            "Zerodha User",
            "Run the 'get_holdings' Zerodha tool.",
            "AI agent retrieving holdings from the Zerodha 'get_holdings' endpoint.",
        );

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(profile.system_prompt()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 5,
        };

        let agent = runtime.create_tool_agent_with_tools(
            executor_config,
            "holdings-agent",
            &[HOLDINGS_TOOL],
        )?;

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for HoldingsAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "HoldingsAgent"
    }
}
