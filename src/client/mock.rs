//! Scripted in-memory transport for engine tests.

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(ApiResponse),
    Fail(String),
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn json(status: u16, body: Value) -> Self {
        MockReply::Respond(ApiResponse { status, body: Some(body) })
    }

    pub fn status(status: u16) -> Self {
        MockReply::Respond(ApiResponse { status, body: None })
    }

    pub fn fail(message: &str) -> Self {
        MockReply::Fail(message.to_string())
    }

    pub fn delayed(delay: Duration, reply: MockReply) -> Self {
        MockReply::Delayed(delay, Box::new(reply))
    }
}

/// Replies are queued per (method, path); the last queued reply repeats.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<MockReply>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, reply: MockReply) {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, method: &Method, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| &call.method == method && call.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().push(request.clone());

        let reply = {
            let mut routes = self.routes.lock();
            match routes.get_mut(&(request.method.clone(), request.path.clone())) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        let mut reply = reply;
        loop {
            match reply {
                Some(MockReply::Delayed(delay, inner)) => {
                    tokio::time::sleep(delay).await;
                    reply = Some(*inner);
                }
                Some(MockReply::Respond(response)) => return Ok(response),
                Some(MockReply::Fail(message)) => return Err(ConsoleError::Transport(message)),
                None => {
                    return Ok(ApiResponse {
                        status: 404,
                        body: Some(json!({
                            "error": format!("no route for {} {}", request.method, request.path)
                        })),
                    })
                }
            }
        }
    }
}
