//! Command-line interface.
//!
//! Wires configured adapters into a `UserService` and dispatches commands.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, PrefsArgs};

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::http::{ReqwestHttpClient, ReqwestHttpClientConfig, RetryPolicy, RetryingHttpClient};
use crate::adapters::logging::TracingLogger;
use crate::adapters::storage::FileStore;
use crate::domain::models::Config;
use crate::services::UserService;

/// Build a service backed by the reqwest client, file storage and tracing.
pub fn build_service(config: &Config) -> Result<UserService> {
    let http = ReqwestHttpClient::new(ReqwestHttpClientConfig::from(&config.http))
        .context("Failed to create HTTP client")?;
    let http = RetryingHttpClient::new(Arc::new(http), RetryPolicy::from(&config.retry));

    Ok(UserService::new(
        Arc::new(http),
        Arc::new(TracingLogger),
        Arc::new(FileStore::new(&config.storage.path)),
    )
    .with_config(&config.service))
}

/// Run a parsed command against a service.
pub async fn dispatch(service: &UserService, command: Commands, json_mode: bool) -> Result<()> {
    match command {
        Commands::Fetch { id } => commands::user::fetch(service, &id, json_mode).await,
        Commands::Score { id } => commands::user::score(service, &id, json_mode).await,
        Commands::Prefs(args) => commands::user::prefs(service, args, json_mode).await,
        Commands::Forget { id } => commands::user::forget(service, &id, json_mode).await,
    }
}

/// Print an error chain and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": causes,
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
