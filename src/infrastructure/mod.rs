//! Infrastructure layer module
//!
//! Application-edge concerns that are not ports:
//! - Configuration management (figment)
//! - Logging subscriber setup (tracing-subscriber)

pub mod config;
pub mod logging;
