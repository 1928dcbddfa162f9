//! Pipeline stage definition

use crew_core::Agent;
use crew_prompt::JinjaTemplate;
use std::sync::Arc;

/// Checkpoint hook run on a stage's output before the next stage starts
///
/// Returning an error aborts the pipeline with the error text as the
/// user-visible reason. The hook may block (the login gate waits for the
/// user to press Enter); there is no timeout on it.
pub type CheckpointFn = Box<dyn Fn(&str) -> crew_core::Result<()> + Send + Sync>;

/// How a stage's instruction is built
pub enum StageInput {
    /// A fixed instruction, independent of earlier stages
    Fixed(String),

    /// A template rendered with `previous` bound to the previous stage's
    /// raw output, embedded verbatim
    Template(JinjaTemplate),
}

impl StageInput {
    /// Build the instruction text for this stage
    pub(crate) fn build(&self, previous: &str) -> crew_core::Result<String> {
        match self {
            Self::Fixed(instruction) => Ok(instruction.clone()),
            Self::Template(template) => template
                .render(&serde_json::json!({ "previous": previous }))
                .map_err(|e| crew_core::Error::ProcessingFailed(e.to_string())),
        }
    }
}

/// One step of a pipeline: a named agent plus its instruction source
pub struct Stage {
    name: String,
    agent: Arc<dyn Agent>,
    input: StageInput,
    checkpoint: Option<CheckpointFn>,
}

impl Stage {
    /// Create a stage with an explicit input source
    pub fn new(name: impl Into<String>, agent: Arc<dyn Agent>, input: StageInput) -> Self {
        Self {
            name: name.into(),
            agent,
            input,
            checkpoint: None,
        }
    }

    /// Create a stage with a fixed instruction
    pub fn fixed(
        name: impl Into<String>,
        agent: Arc<dyn Agent>,
        instruction: impl Into<String>,
    ) -> Self {
        Self::new(name, agent, StageInput::Fixed(instruction.into()))
    }

    /// Create a stage whose instruction embeds the previous stage's output
    pub fn templated(name: impl Into<String>, agent: Arc<dyn Agent>, template: JinjaTemplate) -> Self {
        Self::new(name, agent, StageInput::Template(template))
    }

    /// Attach a checkpoint hook run on this stage's output
    pub fn with_checkpoint(
        mut self,
        checkpoint: impl Fn(&str) -> crew_core::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.checkpoint = Some(Box::new(checkpoint));
        self
    }

    /// Get the stage name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub(crate) fn input(&self) -> &StageInput {
        &self.input
    }

    pub(crate) fn checkpoint(&self) -> Option<&CheckpointFn> {
        self.checkpoint.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crew_core::{Context, Result};

    struct NullAgent;

    #[async_trait]
    impl Agent for NullAgent {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_fixed_input_ignores_previous() {
        let stage = Stage::fixed("login", Arc::new(NullAgent), "Login to the brokerage.");
        let instruction = stage.input().build("anything").unwrap();
        assert_eq!(instruction, "Login to the brokerage.");
    }

    #[test]
    fn test_template_input_embeds_previous_verbatim() {
        let template =
            JinjaTemplate::new("analysis", "Raw holdings:\n\n{{ previous }}").unwrap();
        let stage = Stage::templated("analyze", Arc::new(NullAgent), template);

        let holdings = "INFY | 100 | +4,200\nTCS | 20 | -350";
        let instruction = stage.input().build(holdings).unwrap();
        assert!(instruction.contains(holdings));
    }
}
