use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::HttpError;

/// Port trait for the remote user API
///
/// Paths are relative (`/users/{id}`, `/users/{id}/preferences`); the
/// adapter owns the base URL, headers, and timeouts. Bodies are exchanged
/// as JSON values so the trait stays object-safe and the service decides
/// how to decode them.
///
/// # Error Handling
///
/// Implementations return [`HttpError::RequestFailed`] for non-success
/// statuses, [`HttpError::Transport`] for connection-level failures, and
/// [`HttpError::Decode`] when the response body is not JSON.
///
/// # Example Implementation
///
/// ```ignore
/// struct StaticClient(serde_json::Value);
///
/// #[async_trait]
/// impl HttpClient for StaticClient {
///     async fn get(&self, _path: &str) -> Result<Value, HttpError> {
///         Ok(self.0.clone())
///     }
///
///     async fn post(&self, _path: &str, body: Value) -> Result<Value, HttpError> {
///         Ok(body)
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request and return the decoded JSON body
    async fn get(&self, path: &str) -> Result<Value, HttpError>;

    /// Issue a POST request with a JSON body and return the decoded JSON body
    async fn post(&self, path: &str, body: Value) -> Result<Value, HttpError>;
}
