//! Legacy-code migration review pipeline
//!
//! Prompts an LLM to review a Java source file for modernization issues in
//! four fixed stages:
//!
//! 1. **assess** - a tool agent reads the source file and lists legacy
//!    constructs
//! 2. **compatibility** - identifies Java 17 compatibility issues in those
//!    findings and suggests upgrades
//! 3. **refactor** - proposes refactorings using modern Java features
//! 4. **report** - summarizes everything into a markdown migration plan
//!
//! Each stage's prompt embeds the previous stage's findings verbatim. The
//! final report is printed to stdout.

pub mod agents;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod tools;

// Re-export main types for convenience
pub use agents::{AssessorAgent, CompatibilityAgent, RefactorAgent, ReporterAgent};
pub use config::MigrateConfig;
pub use error::{MigrateError, Result};
pub use pipeline::build_pipeline;
pub use tools::SourceFileTool;
