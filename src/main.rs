//! usercache CLI entry point.

use clap::Parser;

use usercache::cli::{self, Cli};
use usercache::infrastructure::config::ConfigLoader;
use usercache::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli.command, cli.config, cli.json).await;
    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}

async fn run(
    command: cli::Commands,
    config_path: Option<std::path::PathBuf>,
    json_mode: bool,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let service = cli::build_service(&config)?;
    cli::dispatch(&service, command, json_mode).await
}
