//! Reqwest-backed HTTP client adapter.
//!
//! Joins relative paths onto a configured base URL and exchanges JSON
//! bodies. Any non-success status becomes `HttpError::RequestFailed`.

use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::HttpError;
use crate::domain::models::HttpConfig;
use crate::domain::ports::HttpClient;

/// Configuration for the reqwest HTTP client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClientConfig {
    /// Base URL; paths are appended verbatim. Default: `http://localhost:8080/api`.
    pub base_url: String,
    /// Request timeout. Default: 30s.
    pub timeout: Duration,
}

impl Default for ReqwestHttpClientConfig {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for ReqwestHttpClientConfig {
    fn from(config: &HttpConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// HTTP client for the remote user API.
pub struct ReqwestHttpClient {
    config: ReqwestHttpClientConfig,
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(config: ReqwestHttpClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HttpError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn decode(path: &str, response: Response) -> Result<Value, HttpError> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "request failed");
            return Err(HttpError::RequestFailed {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| HttpError::Decode(format!("Failed to parse response from {path}: {e}")))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, path: &str) -> Result<Value, HttpError> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| HttpError::Transport(format!("GET {path} failed: {e}")))?;

        Self::decode(path, response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, HttpError> {
        let response = self
            .client
            .post(self.url(path))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| HttpError::Transport(format!("POST {path} failed: {e}")))?;

        Self::decode(path, response).await
    }
}
