//! Prompt templates for the migration review
//!
//! One instruction per stage. Every stage after the first embeds the
//! previous stage's findings verbatim under `{{ previous }}`.

use crew_prompt::{JinjaTemplate, PromptRegistry, Result};

/// Registry names of the stage templates
pub const COMPATIBILITY_PROMPT: &str = "migrate.compatibility";
pub const REFACTOR_PROMPT: &str = "migrate.refactor";
pub const REPORT_PROMPT: &str = "migrate.report";

/// Instruction for the assessment stage
pub const ASSESS_INSTRUCTION: &str = "Read the Java code with the read_source tool and assess \
any legacy constructs. Return a list of deprecated or legacy Java constructs found in the code.";

/// Create the compatibility stage template
pub fn compatibility_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        COMPATIBILITY_PROMPT,
        r"Please analyze the Java findings below and list potential compatibility issues with Java 17. For each issue, explain the root cause and suggest fixes:

{{ previous }}",
    )
}

/// Create the refactor stage template
pub fn refactor_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        REFACTOR_PROMPT,
        r"Review the findings below and provide refactoring suggestions using modern Java features (e.g., lambdas, streams, var, switch expressions). Explain the benefits for each:

{{ previous }}",
    )
}

/// Create the report stage template
pub fn report_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        REPORT_PROMPT,
        r"Summarize the findings below into a clear markdown migration report. Include:
- Legacy patterns
- Compatibility issues
- Refactoring suggestions

Findings:

{{ previous }}",
    )
}

/// Register all migration prompts with the given registry
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    registry.register(compatibility_prompt()?);
    registry.register(refactor_prompt()?);
    registry.register(report_prompt()?);
    Ok(())
}
