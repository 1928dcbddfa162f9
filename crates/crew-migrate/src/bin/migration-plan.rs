//! Migration review pipeline CLI
//!
//! Reviews a legacy Java source file in four fixed stages and prints the
//! resulting migration plan.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export GEMINI_API_KEY="..."
//! export LEGACY_SOURCE_PATH="legacy_app/Main.java"   # optional override
//!
//! cargo run --bin migration-plan -p crew-migrate
//! ```

use crew_migrate::config::MigrateConfig;
use crew_migrate::{SourceFileTool, build_pipeline};
use crew_runtime::AgentRuntime;
use crew_tools::ToolRegistry;
use crew_workflow::PipelineOutcome;
use std::env;
use std::sync::Arc;

async fn run(config: MigrateConfig) -> crew_migrate::Result<()> {
    // The assessment agent's only tool: the legacy source file
    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(SourceFileTool::new(config.source_path.clone())));

    // Runtime with the Gemini provider
    let provider = Arc::new(crew_llm::providers::GeminiProvider::new(
        config.gemini_api_key.clone(),
    )?);
    let runtime = AgentRuntime::builder()
        .provider(provider)
        .tool_registry(registry)
        .default_model(config.model.clone())
        .build()?;

    // Build and run the four-stage pipeline
    let pipeline = build_pipeline(&runtime, &config)?;
    let mut context = crew_core::Context::new().with_app_name("migration-plan");

    println!(
        "Launching migration review of {}",
        config.source_path.display()
    );

    match pipeline.execute(&mut context).await? {
        PipelineOutcome::Completed(report) => {
            println!("\nFinal Migration Report:\n");
            println!("{}", report.final_output().unwrap_or_default());
        }
        PipelineOutcome::Aborted { stage, reason, .. } => {
            println!("\nPipeline stopped at '{stage}': {reason}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,crew_migrate=info".to_string()),
        )
        .init();

    // Missing configuration is fatal before any network activity
    let config = MigrateConfig::from_env()?;

    // Everything past startup is caught and printed, not re-raised
    if let Err(e) = run(config).await {
        println!("Error running the migration review: {e}");
    }

    Ok(())
}
