//! Tool call dispatch
//!
//! A call flows name → [`ToolKind`] → typed arguments → request body →
//! one backend round trip → relayed payload. [`Dispatcher::dispatch`] keeps
//! the failure kind; [`Dispatcher::call_tool`] folds it into the uniform
//! envelope and never fails.

use crate::config::ServerConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::protocol::CallToolResult;
use crate::tool_span;
use crate::tools::{catalog, ToolArguments, ToolDescriptor, ToolKind};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Backend that executes tools
///
/// One call is one outbound request: no retries and no caching.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// POST `body` to the tool endpoint and return the parsed JSON response
    async fn post(&self, endpoint: &str, body: &Value) -> BridgeResult<Value>;
}

/// HTTP backend speaking to the EagleForge tools API
pub struct HttpBackend {
    config: Arc<ServerConfig>,
    client: Client,
}

impl HttpBackend {
    /// Build the client. Timeouts are left at the reqwest defaults.
    pub fn new(config: Arc<ServerConfig>) -> BridgeResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(BridgeError::transport)?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ToolBackend for HttpBackend {
    async fn post(&self, endpoint: &str, body: &Value) -> BridgeResult<Value> {
        let url = self.config.tool_url(endpoint);
        debug!(%url, "Sending backend request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.backend.api_key)
            .json(body)
            .send()
            .await
            .map_err(BridgeError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(BridgeError::transport)?;

        if !status.is_success() {
            return Err(BridgeError::backend(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(BridgeError::serialization)
    }
}

/// Routes tool calls to a backend
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn ToolBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ToolBackend>) -> Self {
        Self { backend }
    }

    /// Advertised tools, always the same list in the same order
    pub fn list_tools(&self) -> &'static [ToolDescriptor] {
        catalog()
    }

    /// Run one tool call and return the relayed payload
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> BridgeResult<Value> {
        let kind = ToolKind::from_name(name).ok_or_else(|| BridgeError::unknown_tool(name))?;
        let arguments = ToolArguments::parse(kind, arguments)?;
        let body = arguments.to_request_body();

        let response = self
            .backend
            .post(kind.endpoint(), &body)
            .instrument(tool_span!(tool = kind.name(), endpoint = kind.endpoint()))
            .await?;

        Ok(relay_payload(response))
    }

    /// Run one tool call and wrap the outcome in the protocol envelope
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> CallToolResult {
        match self.dispatch(name, arguments).await {
            Ok(payload) => {
                info!(tool = name, "Tool call succeeded");
                CallToolResult::text(render_text(&payload))
            }
            Err(e) => {
                warn!(tool = name, reached_backend = e.reached_backend(), error = %e, "Tool call failed");
                CallToolResult::error(e.to_envelope_text())
            }
        }
    }
}

/// Unwrap a non-null top-level `result` field, otherwise keep the whole document.
///
/// Present but falsy results (`false`, `0`, `""`) are unwrapped like any
/// other value. Only a missing or `null` field keeps the whole document,
/// with its keys in backend order.
pub fn relay_payload(response: Value) -> Value {
    match response {
        Value::Object(mut map) => {
            if let Some(result) = map.get_mut("result").filter(|result| !result.is_null()) {
                return result.take();
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Strings are relayed as-is; everything else as two-space indented JSON
pub fn render_text(payload: &Value) -> String {
    match payload {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use serde_json::json;

    #[test]
    fn test_relay_unwraps_result() {
        assert_eq!(
            relay_payload(json!({"result": {"title": "X"}})),
            json!({"title": "X"})
        );
        assert_eq!(relay_payload(json!({"result": "hi"})), json!("hi"));
    }

    #[test]
    fn test_relay_keeps_document_without_result() {
        let document = json!({"valid": true, "mx": ["mx1.example.com"]});
        assert_eq!(relay_payload(document.clone()), document);
    }

    #[test]
    fn test_relay_keeps_document_with_null_result() {
        let document = json!({"result": null, "error": "nothing found"});
        assert_eq!(relay_payload(document.clone()), document);
    }

    #[test]
    fn test_relay_unwraps_falsy_but_present_result() {
        assert_eq!(relay_payload(json!({"result": false})), json!(false));
        assert_eq!(relay_payload(json!({"result": ""})), json!(""));
        assert_eq!(relay_payload(json!({"result": 0})), json!(0));
    }

    #[test]
    fn test_relayed_document_keeps_backend_key_order() {
        let document = relay_payload(json!({"zone": "example.com", "a": ["93.184.216.34"]}));
        assert_eq!(
            render_text(&document),
            "{\n  \"zone\": \"example.com\",\n  \"a\": [\n    \"93.184.216.34\"\n  ]\n}"
        );
    }

    #[test]
    fn test_relay_passes_non_objects() {
        assert_eq!(relay_payload(json!([1, 2])), json!([1, 2]));
        assert_eq!(relay_payload(json!(3)), json!(3));
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&json!("hi")), "hi");
        assert_eq!(
            render_text(&json!({"title": "X"})),
            "{\n  \"title\": \"X\"\n}"
        );
        assert_eq!(render_text(&json!(42)), "42");
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_backend() {
        let backend = MockBackend::returning(json!({"result": "unused"}));
        let dispatcher = Dispatcher::new(Arc::new(backend.clone()));

        let result = dispatcher.call_tool("foo", &json!({})).await;

        assert_eq!(result, CallToolResult::error("Unknown tool: foo"));
        assert!(backend.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_backend() {
        let backend = MockBackend::returning(json!({}));
        let dispatcher = Dispatcher::new(Arc::new(backend.clone()));

        let result = dispatcher.call_tool("scrape_url", &json!({})).await;

        assert!(result.is_error());
        assert_eq!(
            result.first_text(),
            Some("Error: Invalid arguments for scrape_url: missing field `url`")
        );
        assert!(backend.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_routes_each_kind_to_its_endpoint() {
        let backend = MockBackend::returning(json!({"result": "ok"}));
        let dispatcher = Dispatcher::new(Arc::new(backend.clone()));

        let calls = [
            ("scrape_url", json!({"url": "https://example.com"})),
            ("validate_email", json!({"email": "a@example.com"})),
            ("dns_lookup", json!({"domain": "example.com"})),
            ("web_search", json!({"query": "rust"})),
            (
                "convert_format",
                json!({"content": "# hi", "from_format": "markdown", "to_format": "html"}),
            ),
        ];
        for (name, args) in &calls {
            dispatcher.dispatch(name, args).await.unwrap();
        }

        let endpoints: Vec<String> = backend
            .recorded_calls()
            .await
            .into_iter()
            .map(|call| call.endpoint)
            .collect();
        assert_eq!(
            endpoints,
            vec!["scrape", "email-validate", "dns-lookup", "search", "convert"]
        );
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_error_envelope() {
        let backend = MockBackend::failing("connection refused");
        let dispatcher = Dispatcher::new(Arc::new(backend));

        let result = dispatcher
            .call_tool("dns_lookup", &json!({"domain": "example.com"}))
            .await;

        assert_eq!(result, CallToolResult::error("Error: connection refused"));
    }

    #[tokio::test]
    async fn test_dispatch_keeps_failure_kind() {
        let dispatcher = Dispatcher::new(Arc::new(MockBackend::failing("boom")));

        let err = dispatcher
            .dispatch("dns_lookup", &json!({"domain": "example.com"}))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)));

        let err = dispatcher.dispatch("nope", &json!({})).await.unwrap_err();
        assert!(matches!(err, BridgeError::UnknownTool(_)));
    }

    #[test]
    fn test_list_tools_is_catalog() {
        let dispatcher = Dispatcher::new(Arc::new(MockBackend::returning(json!({}))));
        assert_eq!(dispatcher.list_tools(), catalog());
    }
}
