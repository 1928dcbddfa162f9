//! Pipeline definition and execution

use crate::stage::Stage;
use crew_core::{Context, Result};
use tracing::{info, warn};

/// Outcome of a pipeline run
///
/// A stage producing no usable output is a soft failure: the pipeline stops
/// with `Aborted` and the caller prints the reason as a notice. Hard errors
/// (network failures, provider errors) surface as `Err` from `execute`.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// All stages ran and produced output
    Completed(StageReport),

    /// A stage stopped the run early
    Aborted {
        /// Name of the stage that stopped the run
        stage: String,
        /// User-visible reason
        reason: String,
        /// Outputs collected before the abort
        report: StageReport,
    },
}

impl PipelineOutcome {
    /// Final output of a completed run
    pub fn final_output(&self) -> Option<&str> {
        match self {
            Self::Completed(report) => report.final_output(),
            Self::Aborted { .. } => None,
        }
    }
}

/// Per-stage outputs collected during a run
#[derive(Debug, Default)]
pub struct StageReport {
    outputs: Vec<(String, String)>,
}

impl StageReport {
    /// Record a stage's output
    fn push(&mut self, stage: impl Into<String>, output: impl Into<String>) {
        self.outputs.push((stage.into(), output.into()));
    }

    /// Get the output of a named stage
    pub fn output_of(&self, stage: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, output)| output.as_str())
    }

    /// Get the last recorded output
    pub fn final_output(&self) -> Option<&str> {
        self.outputs.last().map(|(_, output)| output.as_str())
    }

    /// Number of stages that produced output
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check whether any stage produced output
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// A fixed sequence of stages executed strictly in order
///
/// Each stage's instruction is built from the previous stage's raw output
/// (verbatim, via its template) or is a fixed string. Execution stops at the
/// first stage that yields blank output or whose checkpoint declines to
/// continue.
///
/// # Example
///
/// ```ignore
/// use crew_workflow::{Pipeline, Stage};
///
/// let pipeline = Pipeline::builder("portfolio-analysis")
///     .add_stage(Stage::fixed("login", login_agent, "Login to the brokerage via MCP."))
///     .add_stage(Stage::fixed("holdings", holdings_agent, "Show my current stock holdings."))
///     .add_stage(Stage::templated("analysis", analyst_agent, analysis_template))
///     .build();
///
/// let outcome = pipeline.execute(&mut context).await?;
/// ```
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// Get the pipeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Execute all stages in order
    ///
    /// # Arguments
    ///
    /// * `context` - Execution context shared across stages
    ///
    /// # Returns
    ///
    /// `Completed` with all stage outputs, or `Aborted` naming the stage and
    /// reason when a stage produced no usable output or its checkpoint
    /// stopped the run
    pub async fn execute(&self, context: &mut Context) -> Result<PipelineOutcome> {
        let mut report = StageReport::default();
        let mut previous = String::new();

        for stage in &self.stages {
            let instruction = stage.input().build(&previous)?;

            info!(pipeline = %self.name, stage = %stage.name(), "Running stage");
            let output = stage.agent().process(instruction, context).await?;

            if output.trim().is_empty() {
                warn!(stage = %stage.name(), "Stage produced no usable output");
                return Ok(PipelineOutcome::Aborted {
                    stage: stage.name().to_string(),
                    reason: "stage produced no usable output".to_string(),
                    report,
                });
            }

            report.push(stage.name(), output.clone());

            if let Some(checkpoint) = stage.checkpoint() {
                if let Err(e) = checkpoint(&output) {
                    warn!(stage = %stage.name(), "Checkpoint stopped the run: {e}");
                    return Ok(PipelineOutcome::Aborted {
                        stage: stage.name().to_string(),
                        reason: e.to_string(),
                        report,
                    });
                }
            }

            previous = output;
        }

        Ok(PipelineOutcome::Completed(report))
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    name: String,
    stages: Vec<Stage>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Add a stage to the pipeline
    pub fn add_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            stages: self.stages,
        }
    }
}
