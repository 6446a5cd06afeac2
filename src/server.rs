//! MCP request handling
//!
//! [`McpServer`] turns one JSON-RPC message into at most one response. It
//! holds no mutable state, so any number of requests may be handled
//! concurrently against the same instance.

use crate::dispatcher::Dispatcher;
use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, JSONRPC_VERSION,
};
use crate::rpc_span;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, Instrument};

pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Handle one raw line from the transport; bytes that are not UTF-8
    /// JSON get a parse error
    pub async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ))
            }
        };

        // Keep the id when the envelope is malformed so the client can match the error
        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(e.to_string()),
                ))
            }
        };

        self.handle(request).await
    }

    /// Handle one decoded request; notifications return `None`
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let span = rpc_span!(method = %request.method);
        async move {
            let Some(id) = request.id.clone() else {
                debug!("Received notification");
                return None;
            };

            if request.jsonrpc != JSONRPC_VERSION {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!(
                        "unsupported jsonrpc version '{}'",
                        request.jsonrpc
                    )),
                ));
            }

            let outcome = match request.method.as_str() {
                "initialize" => self.initialize(request.params),
                "ping" => Ok(json!({})),
                "tools/list" => to_result(&ListToolsResult {
                    tools: self.dispatcher.list_tools(),
                }),
                "tools/call" => self.call_tool(request.params).await,
                method => Err(JsonRpcError::method_not_found(method)),
            };

            Some(match outcome {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(error) => JsonRpcResponse::failure(id, error),
            })
        }
        .instrument(span)
        .await
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => parse_params(params)?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        to_result(&InitializeResult::new(params.protocol_version))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams =
            parse_params(params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?)?;
        let arguments = params.arguments.unwrap_or(Value::Null);

        let result = self.dispatcher.call_tool(&params.name, &arguments).await;
        to_result(&result)
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_result<T: Serialize>(result: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
