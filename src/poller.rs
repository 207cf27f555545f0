//! Homework status poller
//!
//! Fetches the newest homework on a fixed period and notifies the chat
//! whenever the verdict of the tracked submission changes. Failures are
//! logged and never sent to the chat.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api_client::ApiClient;
use crate::bot::{send_message, Notifier};
use crate::error::PollError;
use crate::homework::{check_response, StatusUpdate, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Notified,
    Unchanged,
    NoHomeworks,
}

pub struct Poller<N> {
    client: ApiClient,
    notifier: N,
    retry_period: Duration,
    cursor: i64,
    last_verdict: Option<Verdict>,
    last_error: Option<String>,
}

impl<N: Notifier> Poller<N> {
    pub fn new(client: ApiClient, notifier: N, retry_period: Duration) -> Self {
        Self {
            client,
            notifier,
            retry_period,
            cursor: chrono::Utc::now().timestamp(),
            last_verdict: None,
            last_error: None,
        }
    }

    /// Runs until Ctrl-C.
    pub async fn run(&mut self) {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl-C, stopping poller");
        };
        self.run_until(ctrl_c).await;
    }

    /// Polls until `shutdown` resolves. Shutdown is observed both while a cycle
    /// is in flight and during the sleep; every cycle, failed or not, is
    /// followed by a full sleep.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!("Starting homework poller (interval: {:?})", self.retry_period);
        tokio::pin!(shutdown);

        loop {
            let result = tokio::select! {
                result = self.poll_once() => result,
                _ = &mut shutdown => break,
            };
            match result {
                Ok(outcome) => debug!("Poll cycle finished: {:?}", outcome),
                Err(e) => self.record_failure(&e),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = &mut shutdown => break,
            }
        }

        info!("Homework poller stopped");
    }

    /// Один цикл: запрос, проверка ответа, сравнение статуса, уведомление.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, PollError> {
        let response = self.client.get_api_answer(Some(self.cursor)).await?;
        self.advance_cursor(&response);

        let homeworks = check_response(&response)?;
        let outcome = match homeworks.first() {
            None => {
                debug!("Нету новых домашек");
                CycleOutcome::NoHomeworks
            }
            Some(homework) => {
                let update = StatusUpdate::parse(homework)?;
                if self.last_verdict == Some(update.verdict) {
                    debug!("Status of {} is still {}", update.homework_name, update.verdict);
                    CycleOutcome::Unchanged
                } else {
                    info!("Status of {} changed to {}", update.homework_name, update.verdict);
                    // Доставка не гарантируется, вердикт запоминаем в любом случае
                    send_message(&self.notifier, &update.message()).await;
                    self.last_verdict = Some(update.verdict);
                    CycleOutcome::Notified
                }
            }
        };

        if let Some(previous) = self.last_error.take() {
            info!("Recovered after failure: {}", previous);
        }
        Ok(outcome)
    }

    fn advance_cursor(&mut self, response: &Value) {
        match response.get("current_date").and_then(Value::as_i64) {
            Some(current_date) => self.cursor = current_date,
            None => warn!(
                "Response has no usable current_date, keeping cursor at {}",
                self.cursor
            ),
        }
    }

    /// Failures only go to the log; the chat never sees them.
    fn record_failure(&mut self, e: &PollError) {
        let message = format!("Сбой в работе программы: {}", e);
        let kind = match e {
            PollError::Fetch(_) => "fetch",
            PollError::Response(_) => "response",
            PollError::Homework(_) => "homework",
        };

        if self.last_error.as_deref() == Some(message.as_str()) {
            error!(kind, repeated = true, "{}", message);
        } else {
            error!(kind, "{}", message);
            self.last_error = Some(message);
        }
    }
}
