//! Report rendering
//!
//! Frames the final analysis text for stdout. No machine-readable output
//! and nothing persisted.

use crew_workflow::PipelineOutcome;

/// Frame a completed analysis for printing
pub fn render_report(analysis: &str) -> String {
    format!("=== Portfolio Analysis Report ===\n\n{analysis}")
}

/// Frame an aborted run as a user-visible notice
pub fn render_notice(stage: &str, reason: &str) -> String {
    format!("Pipeline stopped at '{stage}': {reason}")
}

/// Print the outcome of a pipeline run
pub fn print_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::Completed(report) => {
            let analysis = report.final_output().unwrap_or_default();
            println!("\n{}", render_report(analysis));
        }
        PipelineOutcome::Aborted { stage, reason, .. } => {
            println!("\n{}", render_notice(stage, reason));
        }
    }
}
