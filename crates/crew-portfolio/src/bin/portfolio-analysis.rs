//! Portfolio analysis pipeline CLI
//!
//! Runs the fixed login → holdings → analysis sequence against the Zerodha
//! Kite MCP server and prints the final report.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export OPENAI_API_KEY="sk-..."
//! export MCP_SSE_URL="https://mcp.kite.trade/sse"   # optional override
//!
//! cargo run --bin portfolio-analysis -p crew-portfolio
//! ```

use crew_mcp::client::{McpClient, SseClient};
use crew_mcp::{RetryPolicy, discovery};
use crew_portfolio::config::PortfolioConfig;
use crew_portfolio::{build_pipeline, report};
use crew_runtime::AgentRuntime;
use crew_tools::ToolRegistry;
use std::env;
use std::sync::Arc;

async fn run(config: PortfolioConfig) -> crew_portfolio::Result<()> {
    // Connect to the MCP server; one attempt per call, matching the
    // pipeline's no-retry behavior
    let client = Arc::new(
        SseClient::new(config.endpoint.clone()).with_retry_policy(RetryPolicy::no_retry()),
    );
    client.connect().await?;

    // Discover the remote tools and register them
    let registry = Arc::new(ToolRegistry::new());
    discovery::register_server_tools(client.clone(), &registry).await?;
    println!(
        "Available tools from Zerodha SSE MCP server: {:?}",
        registry.names()
    );

    // Runtime with the OpenAI provider
    let provider = Arc::new(crew_llm::providers::OpenAIProvider::new(
        config.openai_api_key.clone(),
    )?);
    let runtime = AgentRuntime::builder()
        .provider(provider)
        .tool_registry(registry)
        .default_model(config.model.clone())
        .build()?;

    // Build and run the three-stage pipeline
    let pipeline = build_pipeline(&runtime, &config)?;
    let mut context = crew_core::Context::new()
        .with_app_name("portfolio-analysis")
        .with_user_id("user1");

    let outcome = pipeline.execute(&mut context).await?;
    report::print_outcome(&outcome);

    client.disconnect().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,crew_portfolio=info".to_string()),
        )
        .init();

    // Missing configuration is fatal before any network activity
    let config = PortfolioConfig::from_env()?;

    // Everything past startup is caught and printed, not re-raised
    if let Err(e) = run(config).await {
        println!("Error connecting to or using the SSE MCP server: {e}");
        println!("Ensure the SSE MCP server is running and accessible at the configured URL.");
    }

    Ok(())
}
