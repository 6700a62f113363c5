//! Scripted transport for exercising the requester without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ExecutionResult;
use super::transport::{Transport, TransportResponse};

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays queued responses in order and records every request.
///
/// When the queue runs dry every further request gets `404`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.lock_responses()
            .push_back(TransportResponse::new(status, body));
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(self, status: u16, body: &Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<TransportResponse>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) -> TransportResponse {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| TransportResponse::new(404, ""))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, path: &str, body: &Value) -> ExecutionResult<TransportResponse> {
        Ok(self.record("POST", path, Some(body.clone())))
    }

    async fn get(&self, path: &str) -> ExecutionResult<TransportResponse> {
        Ok(self.record("GET", path, None))
    }
}
