//! Sequential stage pipelines for crew-rs
//!
//! This crate runs a fixed sequence of agents where each stage's instruction
//! may embed the previous stage's raw output verbatim. A stage that produces
//! no usable output aborts the run with a user-visible reason instead of an
//! error, and a stage may carry a checkpoint hook for interactive
//! synchronization (e.g. waiting for a manual login).

pub mod pipeline;
pub mod stage;

// Re-export for convenience
pub use pipeline::{Pipeline, PipelineBuilder, PipelineOutcome, StageReport};
pub use stage::{Stage, StageInput};
