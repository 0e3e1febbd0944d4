mod app;
mod block_font;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use tracing_subscriber::{prelude::*, EnvFilter};
use wonkytracks_core::config::{self, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let path = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!(path = %path.display(), "Configuration loaded");

    let mut app = app::WonkyApp::new(config);
    let result = app.run().await;
    if let Err(err) = &result {
        tracing::error!("Application error: {err:#}");
    }
    result
}

/// Log to `logs/wonkytracks.log`; the terminal itself belongs to the UI.
fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("wonkytracks.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
