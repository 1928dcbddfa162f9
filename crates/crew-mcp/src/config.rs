//! Configuration for the SSE MCP endpoint
//!
//! The pipelines talk to exactly one remote server, so configuration is a
//! single endpoint: the brokerage default, overridable through the
//! `MCP_SSE_URL` environment variable.

use crate::error::MCPError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default SSE endpoint of the brokerage MCP server
pub const DEFAULT_SSE_URL: &str = "https://mcp.kite.trade/sse";

/// Environment variable overriding the SSE endpoint (e.g. a local server
/// at `http://localhost:8080/sse`)
pub const SSE_URL_ENV: &str = "MCP_SSE_URL";

fn default_timeout() -> u64 {
    30
}

/// SSE MCP server endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SseEndpoint {
    /// Server URL (the `/sse` stream URL)
    pub url: String,

    /// Extra HTTP headers sent on every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Timeout in seconds for requests and the endpoint handshake
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SseEndpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_SSE_URL.to_string(),
            headers: HashMap::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SseEndpoint {
    /// Create an endpoint for the given URL with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build the endpoint from the environment
    ///
    /// Uses `MCP_SSE_URL` when set, the brokerage default otherwise.
    pub fn from_env() -> Self {
        match std::env::var(SSE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Add an HTTP header sent on every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the endpoint URL
    pub fn validate(&self) -> Result<(), MCPError> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| MCPError::ConfigError(format!("Invalid SSE URL '{}': {e}", self.url)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(MCPError::ConfigError(format!(
                "Unsupported URL scheme '{other}' for SSE endpoint"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let endpoint = SseEndpoint::default();
        assert_eq!(endpoint.url, DEFAULT_SSE_URL);
        assert_eq!(endpoint.timeout_secs, 30);
        assert!(endpoint.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let endpoint = SseEndpoint::new("http://localhost:8080/sse")
            .with_header("Authorization", "Bearer token123")
            .with_timeout(60);

        assert_eq!(endpoint.url, "http://localhost:8080/sse");
        assert_eq!(
            endpoint.headers.get("Authorization").map(String::as_str),
            Some("Bearer token123")
        );
        assert_eq!(endpoint.timeout_secs, 60);
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let endpoint = SseEndpoint::new("ftp://example.com/sse");
        assert!(endpoint.validate().is_err());

        let endpoint = SseEndpoint::new("not a url");
        assert!(endpoint.validate().is_err());
    }
}
