//! Login agent
//!
//! Bound to the remote `login` tool only. Its one job is to trigger the tool
//! and hand back the text announcing the login URL; no reasoning beyond that
//! is wanted, so it gets few loop iterations.

use crate::config::PortfolioConfig;
use async_trait::async_trait;
use crew_core::{Agent, Context, Result};
use crew_runtime::{AgentProfile, AgentRuntime, ExecutorConfig};
use crew_runtime::agents::ToolAgent;

/// Remote capability this agent is bound to
pub const LOGIN_TOOL: &str = "login";

/// Agent that triggers the brokerage login tool
pub struct LoginAgent {
    agent: ToolAgent,
}

impl LoginAgent {
    /// Create a new login agent
    ///
    /// # Errors
    ///
    /// Fails if the `login` tool was not discovered on the MCP server
    pub fn new(runtime: &AgentRuntime, config: &PortfolioConfig) -> Result<Self> {
        let profile = AgentProfile::new(
            "Zerodha Login User",
            "Login to Zerodha via MCP.",
            "Authenticates using the Kite API.",
        );

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(profile.system_prompt()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 3,
        };

        let agent =
            runtime.create_tool_agent_with_tools(executor_config, "login-agent", &[LOGIN_TOOL])?;

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for LoginAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "LoginAgent"
    }
}
