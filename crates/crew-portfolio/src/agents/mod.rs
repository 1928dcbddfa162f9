//! Agents for the portfolio pipeline
//!
//! Three agents, one per stage. The login and holdings agents are each bound
//! to exactly one remote capability; the analyst is LLM-only.

pub mod analyst;
pub mod holdings;
pub mod login;

pub use analyst::AnalystAgent;
pub use holdings::HoldingsAgent;
pub use login::LoginAgent;
