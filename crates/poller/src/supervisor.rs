use std::time::Duration;

use chrono::Utc;

use hw_common::config::{AppConfig, Credentials};
use hw_common::error::ConfigError;
use hw_engine::dedup::{MessageKind, NotificationState};
use hw_notifier::MessageSink;

use crate::cycle::{CycleOutcome, PollCycle};
use crate::fetch::HttpFetch;

/// Prefix of every failure notification.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Runs the poll cycle forever and forwards changes to the chat.
pub struct Supervisor<F, S> {
    cycle: PollCycle<F>,
    sink: S,
    credentials: Credentials,
    retry_period: Duration,
    /// Lower bound of the API window, fixed at startup.
    from_date: i64,
    state: NotificationState,
}

impl<F: HttpFetch, S: MessageSink> Supervisor<F, S> {
    pub fn new(config: &AppConfig, fetcher: F, sink: S) -> Self {
        let lookback = i64::try_from(config.lookback_secs).unwrap_or(i64::MAX);
        let from_date = Utc::now().timestamp().saturating_sub(lookback).max(0);

        Self {
            cycle: PollCycle::new(
                fetcher,
                config.practicum_endpoint.clone(),
                config.credentials.practicum_token(),
            ),
            sink,
            credentials: config.credentials.clone(),
            retry_period: Duration::from_secs(config.retry_period_secs),
            from_date,
            state: NotificationState::new(),
        }
    }

    /// Override the startup-computed `from_date`.
    pub fn with_from_date(mut self, from_date: i64) -> Self {
        self.from_date = from_date;
        self
    }

    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Start the polling loop. Returns only if a required credential is missing.
    pub async fn run(&mut self) -> Result<(), ConfigError> {
        if let Err(e) = self.credentials.ensure_present() {
            tracing::error!(
                severity = "critical",
                missing = ?self.credentials.missing(),
                "{e}"
            );
            return Err(e);
        }

        tracing::info!(
            from_date = self.from_date,
            retry_period_secs = self.retry_period.as_secs(),
            "Homework status polling started"
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One poll-decode-diff-notify iteration, without the trailing sleep.
    ///
    /// `Notification` means the message was new and delivery was attempted;
    /// check [`Supervisor::state`] to see whether it went through.
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.cycle.run_once(self.from_date).await {
            CycleOutcome::Notification(text) => {
                if self.state.is_new(MessageKind::Status, &text) {
                    self.notify(MessageKind::Status, text.clone()).await;
                    CycleOutcome::Notification(text)
                } else {
                    tracing::debug!("No new statuses in API response");
                    CycleOutcome::NoChange
                }
            }
            CycleOutcome::Failure(err) => {
                let message = format!("{FAILURE_PREFIX}: {err}");
                tracing::error!(kind = err.kind(), "{message}");
                if self.state.is_new(MessageKind::Failure, &message) {
                    self.notify(MessageKind::Failure, message).await;
                }
                CycleOutcome::Failure(err)
            }
            CycleOutcome::NoChange => CycleOutcome::NoChange,
        }
    }

    /// Deliver `text` and remember it only if the sink accepted it, so a
    /// failed delivery is retried on the next tick.
    async fn notify(&mut self, kind: MessageKind, text: String) {
        match self
            .sink
            .deliver(self.credentials.telegram_chat_id(), &text)
            .await
        {
            Ok(()) => {
                tracing::info!(%kind, message = %text, "Notification sent");
                self.state.mark_delivered(kind, text);
            }
            Err(e) => {
                tracing::error!(%kind, error = %e, "Notification was not delivered");
            }
        }
    }
}
