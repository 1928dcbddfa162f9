//! Brokerage portfolio analysis pipeline
//!
//! This crate wires LLM-backed agents to the Zerodha Kite MCP server to run
//! a fixed three-stage pipeline:
//!
//! 1. **login** - a tool agent invokes the remote `login` capability; the
//!    login URL is extracted from the output, opened in the system browser,
//!    and the run waits for manual confirmation
//! 2. **holdings** - a tool agent invokes `get_holdings` and returns the raw
//!    holdings text
//! 3. **analysis** - an LLM agent analyzes the holdings (concentration risk
//!    and performance standouts) with the raw text embedded verbatim in its
//!    prompt
//!
//! The final report is printed to stdout; nothing is persisted.

pub mod agents;
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompts;
pub mod report;

// Re-export main types for convenience
pub use agents::{AnalystAgent, HoldingsAgent, LoginAgent};
pub use config::PortfolioConfig;
pub use error::{PortfolioError, Result};
pub use extract::extract_login_url;
pub use pipeline::build_pipeline;
