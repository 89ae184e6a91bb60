//! usercache - cached user lookups with storage fallback
//!
//! A `UserService` fronts a remote user API with an in-memory cache,
//! de-duplicates concurrent remote fetches, and falls back to the last
//! persisted copy of a user when the API is unavailable.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): Fetch coordination and scoring
//! - **Adapters** (`adapters`): HTTP, storage, logging and clock implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration and tracing setup
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use usercache::adapters::http::{ReqwestHttpClient, ReqwestHttpClientConfig};
//! use usercache::adapters::logging::TracingLogger;
//! use usercache::adapters::storage::MemoryStore;
//! use usercache::UserService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let http = ReqwestHttpClient::new(ReqwestHttpClientConfig::default())?;
//!     let service = UserService::new(
//!         Arc::new(http),
//!         Arc::new(TracingLogger),
//!         Arc::new(MemoryStore::new()),
//!     );
//!
//!     let user = service.fetch_by_id("42").await?;
//!     println!("{} scores {}", user.name, service.score_of(Some(&user)));
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{HttpError, ServiceError, ServiceResult, StorageError};
pub use domain::models::{Config, Preferences, PreferencesUpdate, Theme, User};
pub use domain::ports::{Clock, HttpClient, KeyValueStore, Logger};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{score_of, UserService};
