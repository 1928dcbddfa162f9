//! Agents for the migration review pipeline
//!
//! Four agents, one per stage. The assessor is the only tool user (it reads
//! the source file); the rest are LLM-only.

pub mod assessor;
pub mod compatibility;
pub mod refactor;
pub mod reporter;

pub use assessor::AssessorAgent;
pub use compatibility::CompatibilityAgent;
pub use refactor::RefactorAgent;
pub use reporter::ReporterAgent;
