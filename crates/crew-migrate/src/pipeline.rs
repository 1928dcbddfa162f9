//! Pipeline assembly for the migration review
//!
//! Four stages in fixed order: assess → compatibility → refactor → report.
//! No interactive checkpoints; each later stage embeds the previous stage's
//! findings verbatim.

use crate::agents::{AssessorAgent, CompatibilityAgent, RefactorAgent, ReporterAgent};
use crate::config::MigrateConfig;
use crate::error::Result;
use crate::prompts;
use crew_runtime::AgentRuntime;
use crew_workflow::{Pipeline, Stage};
use std::sync::Arc;

/// Build the assess → compatibility → refactor → report pipeline
///
/// # Errors
///
/// Fails if the `read_source` tool is missing from the runtime registry or
/// a prompt template does not parse; both happen before any stage runs.
pub fn build_pipeline(runtime: &AgentRuntime, config: &MigrateConfig) -> Result<Pipeline> {
    let assessor = AssessorAgent::new(runtime, config)?;
    let compatibility = CompatibilityAgent::new(runtime, config);
    let refactor = RefactorAgent::new(runtime, config);
    let reporter = ReporterAgent::new(runtime, config);

    let pipeline = Pipeline::builder("migration-plan")
        .add_stage(Stage::fixed(
            "assess",
            Arc::new(assessor),
            prompts::ASSESS_INSTRUCTION,
        ))
        .add_stage(Stage::templated(
            "compatibility",
            Arc::new(compatibility),
            prompts::compatibility_prompt()?,
        ))
        .add_stage(Stage::templated(
            "refactor",
            Arc::new(refactor),
            prompts::refactor_prompt()?,
        ))
        .add_stage(Stage::templated(
            "report",
            Arc::new(reporter),
            prompts::report_prompt()?,
        ))
        .build();

    Ok(pipeline)
}
