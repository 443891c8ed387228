//! Homework bot - review status poller
//!
//! Polls the homework review API, detects status changes and pushes them to a
//! Telegram chat.

pub mod api_client;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod io;
pub mod notifier;
pub mod state;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config};
pub use engine::{CycleOutcome, PollLoop};
pub use error::{BotError, Result};
pub use state::Watermark;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api_client::PracticumClient;
use crate::io::ReqwestHttpClient;
use crate::telegram::TelegramNotifier;

/// Run the poll loop with the given configuration until Ctrl-C.
///
/// Credentials must already have been checked with
/// [`Config::check_credentials`].
pub async fn run(config: Config, initial: Watermark) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(config.request_timeout())?);
    let api = Arc::new(PracticumClient::new(&config.practicum, Arc::clone(&http)));
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram, Arc::clone(&http)));
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    let mut poll_loop = PollLoop::new(api, notifier, config.retry_interval(), initial, cancel);
    poll_loop.run().await;

    tracing::info!(
        "Homework bot stopped after {} cycle(s), {} notification(s) sent",
        poll_loop.state().cycles,
        poll_loop.state().notifications_sent
    );
    Ok(())
}
