//! HTTP capability used by the execution requester.
//!
//! [`Transport`] is the seam between the requester and the network. The
//! production implementation is [`HttpTransport`] (reqwest); tests use
//! [`super::test_utils::ScriptedTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::Value;

use super::error::{ExecutionError, ExecutionResult};
use crate::config::PlatformSettings;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Raw body; empty when the server sent none.
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response capability with JSON bodies.
///
/// Non-2xx statuses are returned as responses, not errors; only transport
/// failures are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `path`.
    async fn post_json(&self, path: &str, body: &Value) -> ExecutionResult<TransportResponse>;

    /// GET `path`.
    async fn get(&self, path: &str) -> ExecutionResult<TransportResponse>;
}

/// reqwest-backed transport resolving paths against a platform endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport sending `headers` with every request.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        headers: &[(String, String)],
    ) -> ExecutionResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ExecutionError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ExecutionError::InvalidHeader(name.clone()))?;
            default_headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a transport from platform settings, expanding environment variables.
    pub fn from_settings(settings: &PlatformSettings) -> ExecutionResult<Self> {
        let endpoint = settings.resolved_endpoint()?;
        let headers = settings.resolved_headers()?;
        Self::new(endpoint, settings.timeout(), &headers)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URLs are used as is; paths are appended to the endpoint.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.endpoint.trim_end_matches('/'), path)
        }
    }

    async fn read(response: reqwest::Response) -> ExecutionResult<TransportResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> ExecutionResult<TransportResponse> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::read(response).await
    }

    async fn get(&self, path: &str) -> ExecutionResult<TransportResponse> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::read(response).await
    }
}
