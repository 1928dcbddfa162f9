//! Agent runtime for executing agents with dependency injection
//!
//! This crate provides the runtime infrastructure for executing agents:
//! the AgentExecutor for LLM tool loops, AgentRuntime for dependency
//! management, agent profiles, and concrete agent implementations.

pub mod agents;
pub mod executor;
pub mod profile;
pub mod runtime;

// Re-export key types
pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use profile::AgentProfile;
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
