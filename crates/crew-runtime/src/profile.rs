//! Agent profiles
//!
//! A profile is the role/goal/backstory triple an agent is configured with;
//! it renders into the system prompt handed to the LLM.

use serde::{Deserialize, Serialize};

/// Role, goal, and backstory of an agent
///
/// # Example
///
/// ```
/// use crew_runtime::AgentProfile;
///
/// let profile = AgentProfile::new(
///     "Zerodha Login User",
///     "Login to the brokerage via MCP.",
///     "Authenticates using the Kite API.",
/// );
///
/// let prompt = profile.system_prompt();
/// assert!(prompt.contains("Zerodha Login User"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Role the agent plays (e.g. "Portfolio Analysis Assistant")
    pub role: String,

    /// What the agent is trying to accomplish
    pub goal: String,

    /// Background framing that shapes the agent's answers
    pub backstory: String,
}

impl AgentProfile {
    /// Create a new profile
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Render the profile as a system prompt
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}.\n\nYour goal: {goal}\n\nBackground: {backstory}",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_all_parts() {
        let profile = AgentProfile::new(
            "Refactor Advisor",
            "Provide modern refactoring suggestions",
            "Knows modern Java practices.",
        );

        let prompt = profile.system_prompt();
        assert!(prompt.contains("You are Refactor Advisor."));
        assert!(prompt.contains("Your goal: Provide modern refactoring suggestions"));
        assert!(prompt.contains("Background: Knows modern Java practices."));
    }
}
