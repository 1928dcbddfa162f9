//! Pipeline assembly for the portfolio run
//!
//! Wires the three stages together: login (with the browser/Enter gate as
//! its checkpoint), holdings, and analysis (with the holdings text embedded
//! verbatim in its prompt).

use crate::agents::{AnalystAgent, HoldingsAgent, LoginAgent};
use crate::browser;
use crate::config::PortfolioConfig;
use crate::error::Result;
use crate::extract::extract_login_url;
use crate::prompts;
use crew_runtime::AgentRuntime;
use crew_workflow::{Pipeline, Stage};
use std::sync::Arc;

/// Checkpoint on the login stage's output
///
/// Extracts the login URL, opens it in the system browser, and blocks until
/// the user confirms. At most one URL is acted upon; no URL stops the run.
fn login_gate(output: &str) -> crew_core::Result<()> {
    let Some(url) = extract_login_url(output) else {
        return Err(crew_core::Error::Generic(
            "No login URL found in result. Check output above.".to_string(),
        ));
    };

    println!("\nOpen this URL in your browser to complete login:\n{url}\n");
    browser::open_login_url(&url);

    browser::wait_for_confirmation()
        .map_err(|e| crew_core::Error::Generic(format!("Failed reading confirmation: {e}")))
}

/// Build the login → holdings → analysis pipeline
///
/// # Errors
///
/// Fails if a required remote tool is missing or a prompt template does not
/// parse; both happen before any stage runs.
pub fn build_pipeline(runtime: &AgentRuntime, config: &PortfolioConfig) -> Result<Pipeline> {
    let login = LoginAgent::new(runtime, config)?;
    let holdings = HoldingsAgent::new(runtime, config)?;
    let analyst = AnalystAgent::new(runtime, config);

    let pipeline = Pipeline::builder("portfolio-analysis")
        .add_stage(
            Stage::fixed("login", Arc::new(login), prompts::LOGIN_INSTRUCTION)
                .with_checkpoint(login_gate),
        )
        .add_stage(Stage::fixed(
            "holdings",
            Arc::new(holdings),
            prompts::HOLDINGS_INSTRUCTION,
        ))
        .add_stage(Stage::templated(
            "analysis",
            Arc::new(analyst),
            prompts::analysis_prompt()?,
        ))
        .build();

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_gate_rejects_output_without_url() {
        let err = login_gate("The tool returned nothing useful.").unwrap_err();
        assert!(err.to_string().contains("No login URL found"));
    }
}
