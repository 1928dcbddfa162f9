//! Runtime for executing agents with dependency injection
//!
//! The AgentRuntime manages shared resources (LLM provider, tool registry)
//! and provides factory methods for creating different types of agents.

use crew_core::Result;
use crew_llm::LLMProvider;
use crew_tools::ToolRegistry;
use std::sync::Arc;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "gpt-4o".to_string(),
        }
    }
}

/// Runtime for executing agents with dependency injection
///
/// # Example
///
/// ```ignore
/// use crew_runtime::{AgentRuntime, ExecutorConfig, SimpleConfig};
/// use std::sync::Arc;
///
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .tool_registry(tools)
///     .build()?;
///
/// // An agent bound to exactly one remote capability
/// let login_agent = runtime.create_tool_agent_with_tools(
///     ExecutorConfig::default(),
///     "login-agent",
///     &["login"],
/// )?;
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create a simple agent (LLM only, no tools)
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the simple agent
    /// * `name` - Name of the agent
    pub fn create_simple_agent(
        &self,
        config: SimpleConfig,
        name: impl Into<String>,
    ) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// Create a tool-using agent with access to the full registry
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the executor
    /// * `name` - Name of the agent
    pub fn create_tool_agent(&self, config: ExecutorConfig, name: impl Into<String>) -> ToolAgent {
        let executor =
            AgentExecutor::new(self.provider.clone(), self.tool_registry.clone(), config);
        ToolAgent::new(executor, name)
    }

    /// Create a tool-using agent bound to a named subset of tools
    ///
    /// Each pipeline agent is bound to exactly the capability it needs
    /// (the login agent sees only `login`, the holdings agent only
    /// `get_holdings`). A missing tool fails here, before any stage runs.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the executor
    /// * `name` - Name of the agent
    /// * `tool_names` - Names that must resolve in the shared registry
    ///
    /// # Errors
    ///
    /// Returns an error if any named tool is not registered
    pub fn create_tool_agent_with_tools(
        &self,
        config: ExecutorConfig,
        name: impl Into<String>,
        tool_names: &[&str],
    ) -> Result<ToolAgent> {
        let registry = ToolRegistry::new();
        for tool_name in tool_names {
            registry.register(self.tool_registry.get_required(tool_name)?);
        }

        let executor = AgentExecutor::new(self.provider.clone(), Arc::new(registry), config);
        Ok(ToolAgent::new(executor, name))
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            crew_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(AgentRuntime::new(provider, tool_registry, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crew_llm::{CompletionRequest, CompletionResponse};
    use serde_json::Value;

    struct MockProvider;

    #[async_trait]
    impl LLMProvider for MockProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> crew_llm::Result<CompletionResponse> {
            Err(crew_llm::LLMError::RequestFailed("mock".to_string()))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    struct NamedTool(&'static str);

    #[async_trait]
    impl crew_tools::Tool for NamedTool {
        async fn execute(&self, params: Value) -> crew_core::Result<Value> {
            Ok(params)
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            serde_json::json!({})
        }
    }

    #[test]
    fn test_runtime_config_default() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_max_iterations, 10);
        assert_eq!(config.default_model, "gpt-4o");
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentRuntimeBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_agent_with_missing_tool_fails() {
        let runtime = AgentRuntime::builder()
            .provider(Arc::new(MockProvider))
            .build()
            .unwrap();

        let result = runtime.create_tool_agent_with_tools(
            ExecutorConfig::default(),
            "login-agent",
            &["login"],
        );

        let err = result.err().expect("expected error");
        assert!(err.to_string().contains("login tool not found"));
    }

    #[test]
    fn test_tool_agent_with_named_subset() {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(NamedTool("login")));
        registry.register(Arc::new(NamedTool("get_holdings")));

        let runtime = AgentRuntime::builder()
            .provider(Arc::new(MockProvider))
            .tool_registry(registry)
            .build()
            .unwrap();

        let agent = runtime
            .create_tool_agent_with_tools(ExecutorConfig::default(), "login-agent", &["login"])
            .unwrap();

        assert_eq!(crew_core::Agent::name(&agent), "login-agent");
    }
}
