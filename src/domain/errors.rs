//! Error types for the user cache service and its collaborators.

use thiserror::Error;

/// Errors raised by an [`HttpClient`](crate::domain::ports::HttpClient) adapter.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed with status {status}: {path}")]
    RequestFailed { status: u16, path: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl HttpError {
    /// Returns true if the failure is worth retrying.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// transient; everything else is permanent.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors raised by a [`KeyValueStore`](crate::domain::ports::KeyValueStore) adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors surfaced by [`UserService`](crate::services::UserService).
///
/// The wrapped cause is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user id must not be empty")]
    InvalidId,

    #[error("fetch failed for id={id}")]
    FetchFailed {
        id: String,
        #[source]
        source: HttpError,
    },

    #[error("preferences update failed for id={id}")]
    PreferencesUpdateFailed {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ServiceError {
    /// The user id the failure refers to, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::InvalidId => None,
            Self::FetchFailed { id, .. } | Self::PreferencesUpdateFailed { id, .. } => Some(id),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
