//! Homework bot CLI
//!
//! Command-line entry point for the homework review status poller.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config, Watermark};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Polls homework review statuses and reports changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to wait between polls (overrides config file)
    #[arg(long)]
    retry_interval: Option<u64>,

    /// HTTP request timeout in seconds (overrides config file)
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Initial watermark in seconds since epoch (default: now)
    #[arg(long)]
    from_date: Option<i64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_interval={:?}, request_timeout={:?}, from_date={:?}, log_level={:?}",
        args.config,
        args.retry_interval,
        args.request_timeout,
        args.from_date,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if config.check_credentials().is_err() {
        tracing::error!("Required credentials are missing, exiting");
        std::process::exit(1);
    }

    if let Some(retry_interval) = args.retry_interval {
        config.polling.retry_interval_seconds = retry_interval;
    }
    if let Some(request_timeout) = args.request_timeout {
        config.practicum.request_timeout_seconds = request_timeout;
    }

    let initial = args
        .from_date
        .map(Watermark::from_secs)
        .unwrap_or_else(Watermark::now);

    tracing::info!("Starting homework bot");
    homework_bot::run(config, initial).await?;

    Ok(())
}
