use anyhow::{Context, Result};
use apigateway::{
    cli::{Cli, is_authorization_lost, run},
    state::AppState,
};
use clap::Parser;
use dotenv::dotenv;
use shared::{cache::MemoryStorage, config::Config, utils::init_logger};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::init().context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let _log_guard = init_logger("pidash", config.is_dev, config.enable_file_log);

    let state = if cli.ephemeral {
        AppState::with_storage(&config, Arc::new(MemoryStorage::new()))
    } else {
        AppState::new(&config)
    }
    .context("Failed to create AppState")?;

    info!("Talking to {}", config.api_base_url);

    let mut events = state.subscribe();
    let outcome = run(&state, cli.command).await;

    state.navigator.drain(&mut events);

    if cli.metrics {
        print!("{}", state.render_metrics().await?);
    }

    if let Err(e) = &outcome {
        if is_authorization_lost(e) {
            eprintln!(
                "Session expired, log in again (redirected to {})",
                state.navigator.current()
            );
        } else {
            error!("Command failed: {e:#}");
        }
    }

    outcome
}
