//! Poll loop: fetch, validate, notify, sleep

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::api_client::HomeworkApi;
use crate::error::CycleError;
use crate::formatter::format_status;
use crate::notifier::Notifier;
use crate::state::{PollState, Watermark};
use crate::validator::validate;

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Every homework notification was delivered
    Completed {
        delivered: usize,
        watermark: Watermark,
    },
    /// The cycle was aborted; `reported` tells whether an error message
    /// reached the chat
    Failed { error: CycleError, reported: bool },
}

/// Text sent to the chat when a cycle fails
pub fn describe_failure(error: &CycleError) -> String {
    format!("Program failure: {}", error)
}

/// Owns the watermark and the last reported error, and drives one cycle at a
/// time against the API and the notifier.
#[derive(Debug)]
pub struct PollLoop {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    retry_interval: Duration,
    state: PollState,
    span: tracing::Span,
    cancel: CancellationToken,
}

impl PollLoop {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        retry_interval: Duration,
        initial: Watermark,
        cancel: CancellationToken,
    ) -> Self {
        let span = tracing::info_span!(
            "poll_loop",
            endpoint = %api.endpoint(),
            notifier = notifier.type_name(),
            chat = %notifier.destination()
        );
        Self {
            api,
            notifier,
            retry_interval,
            state: PollState::new(initial.or_now()),
            span,
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token fires. The interval is slept after
    /// every cycle, successful or not.
    pub async fn run(&mut self) {
        tracing::info!(
            parent: &self.span,
            "Poll loop started from {} with interval {:?}",
            self.state.watermark,
            self.retry_interval
        );

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.retry_interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!(parent: &self.span, "Poll loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch-validate-notify cycle and update the loop state
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let span = self.span.clone();
        self.cycle().instrument(span).await
    }

    async fn cycle(&mut self) -> CycleOutcome {
        tracing::debug!("Polling for status changes since {}", self.state.watermark);

        match self.poll_once().await {
            Ok((delivered, current_date)) => {
                if !self.state.record_success(current_date) {
                    tracing::warn!(
                        "Ignoring current_date {} older than watermark {}",
                        current_date,
                        self.state.watermark
                    );
                }
                tracing::debug!(
                    "Cycle {} done: {} notification(s), watermark {}",
                    self.state.cycles,
                    delivered,
                    self.state.watermark
                );
                CycleOutcome::Completed {
                    delivered,
                    watermark: self.state.watermark,
                }
            }
            Err(error) => {
                let outage = self.state.record_failure();
                let reported = self.report_failure(&error).await;
                if outage {
                    tracing::warn!(
                        "{} consecutive cycles failed, watermark stuck at {}",
                        self.state.consecutive_failures,
                        self.state.watermark
                    );
                }
                CycleOutcome::Failed { error, reported }
            }
        }
    }

    async fn poll_once(&mut self) -> Result<(usize, Watermark), CycleError> {
        let response = self.api.fetch(self.state.watermark).await?;
        let validated = validate(&response)?;

        let mut delivered = 0;
        for homework in &validated.homeworks {
            let message = format_status(homework)?;
            self.notifier.send(&message).await?;
            delivered += 1;
            self.state.notifications_sent += 1;
        }

        Ok((delivered, validated.current_date))
    }

    /// Forward a failure to the chat unless it repeats the last one sent
    async fn report_failure(&mut self, error: &CycleError) -> bool {
        let text = describe_failure(error);
        tracing::error!(kind = error.kind(), "{}", text);

        if !self.state.is_new_error(&text) {
            tracing::warn!("Same error as last reported, not notifying again");
            return false;
        }

        match self.notifier.send(&text).await {
            Ok(()) => {
                self.state.notifications_sent += 1;
                self.state.remember_error(text);
                true
            }
            Err(e) => {
                tracing::error!("Could not report failure to chat: {}", e);
                false
            }
        }
    }
}
