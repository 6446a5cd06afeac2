//! Mock implementations for testing
//!
//! [`MockBackend`] records every outbound call so tests can assert on the
//! exact endpoint and body, or on the absence of any call.

use crate::dispatcher::ToolBackend;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// One request the dispatcher sent to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub body: Value,
}

type Responder = dyn Fn(&str, &Value) -> BridgeResult<Value> + Send + Sync;

/// Mock backend for testing
#[derive(Clone)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Arc<Responder>,
    delay: Option<Duration>,
}

impl MockBackend {
    /// Answer every call with the same JSON document
    pub fn returning(response: Value) -> Self {
        Self::with_responder(move |_, _| Ok(response.clone()))
    }

    /// Answer every call with `{"result": <request body>}`
    pub fn echo() -> Self {
        Self::with_responder(|_, body| Ok(json!({ "result": body })))
    }

    /// Fail every call as if the backend were unreachable
    pub fn failing<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        Self::with_responder(move |_, _| Err(BridgeError::Transport(message.clone())))
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str, &Value) -> BridgeResult<Value> + Send + Sync + 'static,
    {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
            delay: None,
        }
    }

    /// Hold each response for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl ToolBackend for MockBackend {
    async fn post(&self, endpoint: &str, body: &Value) -> BridgeResult<Value> {
        self.calls.lock().await.push(RecordedCall {
            endpoint: endpoint.to_string(),
            body: body.clone(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(endpoint, body)
    }
}
