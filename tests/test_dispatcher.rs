//! Integration tests for the dispatcher against a stubbed backend
//!
//! Tests behavioral contracts of the HTTP bridge:
//! - request shape (method, path, headers, body with defaults)
//! - success relay and the `result` unwrap rule
//! - error envelopes for unknown tools, unreachable backends, non-2xx and
//!   non-JSON responses

use eagleforge_tools_mcp::config::{BackendSection, ServerConfig};
use eagleforge_tools_mcp::dispatcher::{Dispatcher, HttpBackend};
use eagleforge_tools_mcp::error::BridgeError;
use eagleforge_tools_mcp::protocol::CallToolResult;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        backend: BackendSection {
            base_url: base_url.to_string(),
            api_key: "test-api-key".to_string(),
        },
    })
}

fn dispatcher_for(base_url: &str) -> Dispatcher {
    let backend = HttpBackend::new(test_config(base_url)).unwrap();
    Dispatcher::new(Arc::new(backend))
}

#[tokio::test]
async fn test_unknown_tool_returns_error_without_contacting_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool("foo", &json!({"url": "https://example.com"}))
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"isError": true, "content": [{"type": "text", "text": "Unknown tool: foo"}]})
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scrape_url_applies_catalog_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/scrape"))
        .and(body_json(json!({
            "url": "https://example.com",
            "format": "markdown",
            "max_chars": 50000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "# Example"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool("scrape_url", &json!({"url": "https://example.com"}))
        .await;

    assert_eq!(result, CallToolResult::text("# Example"));
}

#[tokio::test]
async fn test_request_carries_api_key_and_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/email-validate"))
        .and(header("X-API-Key", "test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"email": "someone@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"valid": true}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool("validate_email", &json!({"email": "someone@example.com"}))
        .await;

    assert!(!result.is_error());
    assert_eq!(result.first_text(), Some("{\n  \"valid\": true\n}"));
}

#[tokio::test]
async fn test_success_relay_unwraps_result_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/dns-lookup"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"title": "X"}})),
        )
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool("dns_lookup", &json!({"domain": "example.com"}))
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"content": [{"type": "text", "text": "{\n  \"title\": \"X\"\n}"}]})
    );
}

#[tokio::test]
async fn test_success_relay_without_result_field_keeps_whole_document() {
    let mock_server = MockServer::start().await;
    let document = json!({
        "query": "rust",
        "results": [{"title": "Rust", "url": "https://www.rust-lang.org", "snippet": "A language"}]
    });

    Mock::given(method("POST"))
        .and(path("/tools/search"))
        .and(body_json(json!({"query": "rust", "count": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool("web_search", &json!({"query": "rust"}))
        .await;

    let relayed: serde_json::Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
    assert_eq!(relayed, document);
}

#[tokio::test]
async fn test_convert_format_scenario() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/convert"))
        .and(body_json(json!({
            "content": "<p>hi</p>",
            "from_format": "html",
            "to_format": "text"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "hi"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool(
            "convert_format",
            &json!({"content": "<p>hi</p>", "from_format": "html", "to_format": "text"}),
        )
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"content": [{"type": "text", "text": "hi"}]})
    );
}

#[tokio::test]
async fn test_unreachable_backend_returns_error_and_dispatcher_stays_usable() {
    // Port 1 is reserved and refuses connections
    let dispatcher = dispatcher_for("http://127.0.0.1:1");

    for _ in 0..2 {
        let result = dispatcher
            .call_tool("dns_lookup", &json!({"domain": "example.com"}))
            .await;

        assert!(result.is_error());
        assert_eq!(result.content.len(), 1);
        assert!(result.first_text().unwrap().starts_with("Error: "));
    }

    let err = dispatcher
        .dispatch("dns_lookup", &json!({"domain": "example.com"}))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Transport(_)));
}

#[tokio::test]
async fn test_non_success_status_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/scrape"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"error": "payment required"})),
        )
        .mount(&mock_server)
        .await;

    let dispatcher = dispatcher_for(&mock_server.uri());

    let err = dispatcher
        .dispatch("scrape_url", &json!({"url": "https://example.com"}))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Backend { status: 402, .. }));

    let result = dispatcher
        .call_tool("scrape_url", &json!({"url": "https://example.com"}))
        .await;
    assert_eq!(
        result,
        CallToolResult::error(r#"Error: Backend returned HTTP 402: {"error":"payment required"}"#)
    );
}

#[tokio::test]
async fn test_non_json_body_is_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/dns-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let dispatcher = dispatcher_for(&mock_server.uri());

    let err = dispatcher
        .dispatch("dns_lookup", &json!({"domain": "example.com"}))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Serialization(_)));

    let result = dispatcher
        .call_tool("dns_lookup", &json!({"domain": "example.com"}))
        .await;
    assert!(result.is_error());
    assert!(result
        .first_text()
        .unwrap()
        .starts_with("Error: Backend response is not valid JSON"));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_tolerated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/dns-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&format!("{}/", mock_server.uri()))
        .call_tool("dns_lookup", &json!({"domain": "example.com"}))
        .await;

    assert_eq!(result, CallToolResult::text("ok"));
}

#[tokio::test]
async fn test_caller_values_override_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tools/scrape"))
        .and(body_json(json!({
            "url": "https://example.com",
            "format": "json",
            "max_chars": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = dispatcher_for(&mock_server.uri())
        .call_tool(
            "scrape_url",
            &json!({"url": "https://example.com", "format": "json", "max_chars": 100, "extra": 1}),
        )
        .await;

    assert_eq!(result, CallToolResult::text("{}"));
}
