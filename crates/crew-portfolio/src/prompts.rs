//! Prompt templates for the portfolio pipeline
//!
//! Stage instructions and the analysis prompt. The analysis template embeds
//! the raw holdings text verbatim under `{{ previous }}`; nothing is parsed
//! out of it first.

use crew_prompt::{JinjaTemplate, PromptRegistry, Result};

/// Registry name of the analysis prompt
pub const ANALYSIS_PROMPT: &str = "portfolio.analysis";

/// Instruction for the login stage
pub const LOGIN_INSTRUCTION: &str = "Login to Zerodha MCP. Return the login URL which must be \
opened in a browser to complete authentication.";

/// Instruction for the holdings stage
pub const HOLDINGS_INSTRUCTION: &str = "Show my current stock holdings. Return the raw output \
of the get_holdings tool.";

/// Create the analysis prompt template
pub fn analysis_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        ANALYSIS_PROMPT,
        r"You are a senior portfolio analyst.

Given only the raw stock holdings listed below, do not invent or assume any other holdings.

**Perform just these two analyses:**

1. **Concentration Risk**: Identify if a significant percentage of the total portfolio is allocated to a single stock or sector. Quantify the largest exposures, explain why this matters, and suggest specific diversification improvements.

2. **Performance Standouts**: Clearly identify the best and worst performing stocks in the portfolio (by absolute and percentage P&L), and give actionable recommendations (e.g., “Consider booking profits,” “Monitor for recovery or exit,” etc).

Raw holdings:

{{ previous }}

For each section, include concise, actionable insights (no generic explanations). Use only the provided data.",
    )
}

/// Register all portfolio prompts with the given registry
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    registry.register(analysis_prompt()?);
    Ok(())
}
