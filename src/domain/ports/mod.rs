//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the user service consumes:
//! - HttpClient: remote user API
//! - KeyValueStore: string-keyed persistent storage
//! - Logger: fire-and-forget log sink
//! - Clock: source of the current instant
//!
//! The service depends only on these traits; concrete implementations
//! live in `crate::adapters`.

pub mod clock;
pub mod http_client;
pub mod key_value_store;
pub mod logger;

pub use clock::Clock;
pub use http_client::HttpClient;
pub use key_value_store::KeyValueStore;
pub use logger::Logger;
