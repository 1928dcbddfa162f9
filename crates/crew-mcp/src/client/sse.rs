//! SSE transport MCP client
//!
//! Communicates with a remote MCP server over the HTTP+SSE transport:
//! a long-lived GET on the configured URL yields an event stream whose first
//! `endpoint` event announces where JSON-RPC 2.0 requests must be POSTed;
//! responses arrive back as `message` events on the stream and are routed to
//! the in-flight request by id.

use super::{McpClient, McpServerInfo, McpToolDefinition, McpToolResult};
use crate::config::SseEndpoint;
use crate::error::MCPError;
use crate::retry::RetryPolicy;
use crate::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Value>>>>;

/// MCP client using the HTTP+SSE transport
pub struct SseClient {
    endpoint: SseEndpoint,

    /// HTTP client (no global timeout: the event stream is long-lived;
    /// POSTs carry a per-request timeout instead)
    http_client: reqwest::Client,

    /// JSON-RPC POST target announced by the `endpoint` event
    message_url: Arc<Mutex<Option<String>>>,

    /// Server info from initialization
    server_info: Arc<Mutex<Option<McpServerInfo>>>,

    /// Connection state
    connected: Arc<Mutex<bool>>,

    /// Request ID counter
    request_id: Arc<Mutex<u64>>,

    /// In-flight requests awaiting a response off the stream
    pending: PendingMap,

    /// Stream reader task
    reader: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// Retry policy for the connection handshake
    retry_policy: RetryPolicy,
}

impl SseClient {
    /// Create a new SSE MCP client for the given endpoint
    pub fn new(endpoint: SseEndpoint) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            http_client,
            message_url: Arc::new(Mutex::new(None)),
            server_info: Arc::new(Mutex::new(None)),
            connected: Arc::new(Mutex::new(false)),
            request_id: Arc::new(Mutex::new(0)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            reader: Arc::new(Mutex::new(None)),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Create a client with a custom retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Get next request ID
    async fn next_request_id(&self) -> u64 {
        let mut id = self.request_id.lock().await;
        *id += 1;
        *id
    }

    /// Build HTTP headers for POST requests
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut header_map = HeaderMap::new();
        header_map.insert("Content-Type", HeaderValue::from_static("application/json"));

        for (key, value) in &self.endpoint.headers {
            let name = HeaderName::from_str(key)
                .map_err(|e| MCPError::ConfigError(format!("Invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                MCPError::ConfigError(format!("Invalid header value '{value}': {e}"))
            })?;
            header_map.insert(name, value);
        }

        Ok(header_map)
    }

    /// Open the event stream and spawn the reader task
    ///
    /// The `endpoint` event observed on the stream is delivered through
    /// `endpoint_tx`; subsequent `message` events are routed to pending
    /// request waiters.
    async fn spawn_reader(&self, endpoint_tx: oneshot::Sender<String>) -> Result<()> {
        let mut headers = self.build_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let response = self
            .http_client
            .get(&self.endpoint.url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| MCPError::ConnectionFailed(format!("SSE request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MCPError::ConnectionFailed(format!(
                "HTTP {} from SSE endpoint {}",
                response.status(),
                self.endpoint.url
            )));
        }

        let base_url = url::Url::parse(&self.endpoint.url)
            .map_err(|e| MCPError::ConfigError(format!("Invalid SSE URL: {e}")))?;
        let pending = self.pending.clone();

        let handle = tokio::spawn(async move {
            let mut endpoint_tx = Some(endpoint_tx);
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        warn!("SSE stream error: {e}");
                        break;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Events are framed by a blank line
                while let Some(pos) = buffer.find("\n\n") {
                    let frame = buffer[..pos].to_string();
                    buffer.drain(..=pos + 1);

                    if let Some(event) = parse_sse_frame(&frame) {
                        handle_event(event, &base_url, &mut endpoint_tx, &pending).await;
                    }
                }
            }

            debug!("SSE reader task finished");
        });

        *self.reader.lock().await = Some(handle);
        Ok(())
    }

    /// Send a JSON-RPC request and wait for its response
    ///
    /// The SSE transport answers on the event stream; servers that answer the
    /// POST inline are handled as well.
    async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let message_url = self
            .message_url
            .lock()
            .await
            .clone()
            .ok_or(MCPError::NotConnected)?;

        let id = self.next_request_id().await;
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        debug!("Sending request {id} to {message_url}: {method}");

        let headers = self.build_headers()?;
        let post = self
            .http_client
            .post(&message_url)
            .headers(headers)
            .json(&request)
            .timeout(Duration::from_secs(self.endpoint.timeout_secs))
            .send()
            .await;

        let response = match post {
            Ok(response) => response,
            Err(e) => {
                self.pending.lock().await.remove(&id);
                return Err(MCPError::RequestFailed(format!("HTTP request failed: {e}")));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            self.pending.lock().await.remove(&id);
            return Err(MCPError::RequestFailed(format!(
                "HTTP {status} for {method}: {}",
                response.text().await.unwrap_or_default()
            )));
        }

        // Inline JSON-RPC response short-circuits the stream wait
        if let Ok(body) = response.json::<Value>().await {
            if body.get("id").and_then(Value::as_u64) == Some(id)
                && (body.get("result").is_some() || body.get("error").is_some())
            {
                self.pending.lock().await.remove(&id);
                return unpack_response(method, body);
            }
        }

        match tokio::time::timeout(Duration::from_secs(self.endpoint.timeout_secs), rx).await {
            Ok(Ok(message)) => unpack_response(method, message),
            Ok(Err(_)) => Err(MCPError::RequestFailed(format!(
                "{method}: response channel closed"
            ))),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(MCPError::RequestTimeout(format!(
                    "no response to {method} within {}s",
                    self.endpoint.timeout_secs
                )))
            }
        }
    }

    /// Send initialize request and the initialized notification
    async fn initialize(&self) -> Result<McpServerInfo> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "clientInfo": {
                "name": "crew-rs",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let result = self.send_request("initialize", params).await?;

        let server_info = McpServerInfo {
            name: result["serverInfo"]["name"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            version: result["serverInfo"]["version"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            protocol_version: result["protocolVersion"]
                .as_str()
                .unwrap_or(PROTOCOL_VERSION)
                .to_string(),
        };

        // Initialized notification (no id, fire and forget)
        let notification = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        });

        if let Some(message_url) = self.message_url.lock().await.clone() {
            let headers = self.build_headers()?;
            let _ = self
                .http_client
                .post(&message_url)
                .headers(headers)
                .json(&notification)
                .timeout(Duration::from_secs(self.endpoint.timeout_secs))
                .send()
                .await;
        }

        Ok(server_info)
    }
}

#[async_trait]
impl McpClient for SseClient {
    async fn connect(&self) -> Result<()> {
        debug!("Connecting to MCP server: {}", self.endpoint.url);
        self.endpoint.validate()?;

        let (endpoint_tx, endpoint_rx) = oneshot::channel();
        self.spawn_reader(endpoint_tx).await?;

        let message_url =
            tokio::time::timeout(Duration::from_secs(self.endpoint.timeout_secs), endpoint_rx)
                .await
                .map_err(|_| {
                    MCPError::ConnectionFailed(
                        "timed out waiting for the endpoint event".to_string(),
                    )
                })?
                .map_err(|_| {
                    MCPError::ConnectionFailed(
                        "event stream closed before the endpoint event".to_string(),
                    )
                })?;

        debug!("Server announced message endpoint: {message_url}");
        *self.message_url.lock().await = Some(message_url);

        let url = self.endpoint.url.clone();
        let server_info = self
            .retry_policy
            .execute(&format!("initialize {url}"), || self.initialize())
            .await?;

        info!(
            "Connected to MCP server: {} v{}",
            server_info.name, server_info.version
        );

        *self.server_info.lock().await = Some(server_info);
        *self.connected.lock().await = true;

        Ok(())
    }

    async fn is_connected(&self) -> bool {
        *self.connected.lock().await
    }

    async fn disconnect(&self) -> Result<()> {
        debug!("Disconnecting from MCP server");

        if let Some(handle) = self.reader.lock().await.take() {
            handle.abort();
        }

        *self.connected.lock().await = false;
        *self.message_url.lock().await = None;
        self.pending.lock().await.clear();

        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<McpToolDefinition>> {
        if !self.is_connected().await {
            return Err(MCPError::NotConnected);
        }

        let result = self.send_request("tools/list", json!({})).await?;

        let tools: Vec<McpToolDefinition> = serde_json::from_value(result["tools"].clone())
            .map_err(|e| MCPError::RequestFailed(format!("Failed to parse tools: {e}")))?;

        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult> {
        if !self.is_connected().await {
            return Err(MCPError::NotConnected);
        }

        let params = json!({
            "name": name,
            "arguments": arguments
        });

        let result = self.send_request("tools/call", params).await?;

        let tool_result: McpToolResult = serde_json::from_value(result)
            .map_err(|e| MCPError::ToolCallFailed(format!("Failed to parse result: {e}")))?;

        Ok(tool_result)
    }

    async fn server_info(&self) -> Option<McpServerInfo> {
        self.server_info.lock().await.clone()
    }
}

/// A parsed SSE event (name + joined data lines)
#[derive(Debug, PartialEq, Eq)]
struct SseEvent {
    name: String,
    data: String,
}

/// Parse one SSE frame (the lines between blank-line separators)
fn parse_sse_frame(frame: &str) -> Option<SseEvent> {
    let mut name = String::new();
    let mut data_lines = Vec::new();

    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("event:") {
            name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        }
        // comment lines (":") and id/retry fields are ignored
    }

    if name.is_empty() && data_lines.is_empty() {
        return None;
    }

    Some(SseEvent {
        name,
        data: data_lines.join("\n"),
    })
}

/// Resolve the announced endpoint (absolute URL or path) against the SSE URL
fn resolve_endpoint(base_url: &url::Url, data: &str) -> String {
    base_url
        .join(data.trim())
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| data.trim().to_string())
}

/// Dispatch one parsed SSE event
async fn handle_event(
    event: SseEvent,
    base_url: &url::Url,
    endpoint_tx: &mut Option<oneshot::Sender<String>>,
    pending: &PendingMap,
) {
    match event.name.as_str() {
        "endpoint" => {
            let resolved = resolve_endpoint(base_url, &event.data);
            if let Some(tx) = endpoint_tx.take() {
                let _ = tx.send(resolved);
            }
        }
        "message" | "" => match serde_json::from_str::<Value>(&event.data) {
            Ok(message) => route_response(message, pending).await,
            Err(e) => warn!("Discarding non-JSON SSE message: {e}"),
        },
        other => debug!("Ignoring SSE event '{other}'"),
    }
}

/// Route a JSON-RPC response to the waiter registered for its id
async fn route_response(message: Value, pending: &PendingMap) {
    let Some(id) = message.get("id").and_then(Value::as_u64) else {
        debug!("Ignoring server message without id");
        return;
    };

    if let Some(tx) = pending.lock().await.remove(&id) {
        let _ = tx.send(message);
    } else {
        debug!("No waiter for response id {id}");
    }
}

/// Extract the result from a JSON-RPC response
fn unpack_response(method: &str, message: Value) -> Result<Value> {
    if let Some(error) = message.get("error") {
        return Err(MCPError::RequestFailed(format!("{method}: {error}")));
    }

    message
        .get("result")
        .cloned()
        .ok_or_else(|| MCPError::RequestFailed("No result in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SseClient::new(SseEndpoint::new("http://localhost:8080/sse"));
        assert_eq!(client.endpoint.url, "http://localhost:8080/sse");
    }

    #[test]
    fn test_parse_sse_frame_endpoint_event() {
        let frame = "event: endpoint\ndata: /messages?session=abc";
        let event = parse_sse_frame(frame).unwrap();
        assert_eq!(event.name, "endpoint");
        assert_eq!(event.data, "/messages?session=abc");
    }

    #[test]
    fn test_parse_sse_frame_joins_data_lines() {
        let frame = "event: message\ndata: {\"jsonrpc\":\"2.0\",\ndata: \"id\":1}";
        let event = parse_sse_frame(frame).unwrap();
        assert_eq!(event.data, "{\"jsonrpc\":\"2.0\",\n\"id\":1}");
    }

    #[test]
    fn test_parse_sse_frame_ignores_comments() {
        assert!(parse_sse_frame(": keep-alive").is_none());
        assert!(parse_sse_frame("").is_none());
    }

    #[test]
    fn test_resolve_endpoint_relative_and_absolute() {
        let base = url::Url::parse("https://mcp.kite.trade/sse").unwrap();

        assert_eq!(
            resolve_endpoint(&base, "/messages?session=xyz"),
            "https://mcp.kite.trade/messages?session=xyz"
        );
        assert_eq!(
            resolve_endpoint(&base, "https://other.example/rpc"),
            "https://other.example/rpc"
        );
    }

    #[test]
    fn test_unpack_response_result() {
        let message = json!({ "jsonrpc": "2.0", "id": 1, "result": { "tools": [] } });
        let result = unpack_response("tools/list", message).unwrap();
        assert!(result["tools"].is_array());
    }

    #[test]
    fn test_unpack_response_error() {
        let message = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "Method not found" }
        });
        let err = unpack_response("tools/call", message).unwrap_err();
        assert!(err.to_string().contains("tools/call"));
    }

    #[tokio::test]
    async fn test_route_response_delivers_by_id() {
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let (tx, rx) = oneshot::channel();
        pending.lock().await.insert(7, tx);

        route_response(json!({ "id": 7, "result": "ok" }), &pending).await;

        let message = rx.await.unwrap();
        assert_eq!(message["result"], "ok");
        assert!(pending.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_requests_fail_when_not_connected() {
        let client = SseClient::new(SseEndpoint::new("http://localhost:9/sse"));
        let result = client.list_tools().await;
        assert!(matches!(result, Err(MCPError::NotConnected)));
    }
}
