pub mod config;
pub mod user;

pub use config::{Config, HttpConfig, LoggingConfig, RetryConfig, ServiceConfig, StorageConfig};
pub use user::{Preferences, PreferencesUpdate, Theme, User};
