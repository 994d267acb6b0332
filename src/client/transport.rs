use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// A request against the backend, path relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), body: Some(body) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::DELETE, path: path.into(), body: None }
    }
}

/// Status and parsed JSON body. `body` is `None` for empty or non-JSON payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves requests to the backend. Only a missing response is an `Err`;
/// every HTTP status comes back as an `ApiResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport used against a live backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header("x-request-id", request_id.as_str());

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, %url, error = %e, "request failed without a response");
            ConsoleError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        debug!(
            method = %request.method,
            %url,
            status,
            request_id = %request_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );

        let body = if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(%url, status, error = %e, "response body is not JSON");
                    None
                }
            }
        };

        Ok(ApiResponse { status, body })
    }
}
