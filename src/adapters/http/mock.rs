//! Mock HTTP client for testing.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::errors::HttpError;
use crate::domain::ports::HttpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
}

/// Scripted reply for a method/path pair.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this JSON body
    Json(Value),
    /// Non-success status
    Status(u16),
    /// Connection-level failure
    Transport(String),
}

impl MockReply {
    pub fn json<T: Serialize>(body: &T) -> Self {
        Self::Json(serde_json::to_value(body).unwrap_or(Value::Null))
    }

    pub const fn status(code: u16) -> Self {
        Self::Status(code)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: RequestMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Mock HTTP client with scripted replies and call recording.
///
/// Unscripted paths answer 404. An optional latency makes each call sleep
/// on the tokio clock, and the peak number of simultaneous calls is tracked
/// so tests can assert that requests never overlap.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    replies: Mutex<HashMap<(RequestMethod, String), MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Duration,
    active: AtomicUsize,
    peak_active: AtomicUsize,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn reply_get(&self, path: impl Into<String>, reply: MockReply) {
        self.script(RequestMethod::Get, path.into(), reply);
    }

    pub fn reply_post(&self, path: impl Into<String>, reply: MockReply) {
        self.script(RequestMethod::Post, path.into(), reply);
    }

    /// All received calls, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_count(&self, path: &str) -> usize {
        self.count(RequestMethod::Get, path)
    }

    pub fn post_count(&self, path: &str) -> usize {
        self.count(RequestMethod::Post, path)
    }

    /// Body of the most recent POST to `path`.
    pub fn last_post_body(&self, path: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|call| call.method == RequestMethod::Post && call.path == path)
            .and_then(|call| call.body.clone())
    }

    /// Highest number of calls that were in progress at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }

    fn script(&self, method: RequestMethod, path: String, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path), reply);
    }

    fn count(&self, method: RequestMethod, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    async fn respond(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, HttpError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_active.fetch_max(active, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or(MockReply::Status(404));

        match reply {
            MockReply::Json(value) => Ok(value),
            MockReply::Status(status) => Err(HttpError::RequestFailed {
                status,
                path: path.to_string(),
            }),
            MockReply::Transport(message) => Err(HttpError::Transport(message)),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, path: &str) -> Result<Value, HttpError> {
        self.respond(RequestMethod::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, HttpError> {
        self.respond(RequestMethod::Post, path, Some(body)).await
    }
}
