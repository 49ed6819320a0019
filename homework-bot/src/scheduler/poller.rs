//! Status poller
//!
//! Polls the homework API on a fixed interval and notifies the recipient when
//! the newest submission changes status. One cycle runs to completion before
//! the next starts; a failed cycle is logged and reported, never fatal.

use std::future::Future;
use std::sync::Arc;

use homework_client::FetchError;
use homework_core::catalog::StatusCatalog;
use homework_core::detector::{ChangeDetector, NotificationState};
use homework_core::domain::cursor::PollCursor;
use homework_core::domain::submission::{PollResponse, SubmissionRecord};
use homework_core::error::ValidationError;
use homework_core::message;
use homework_core::validation::ResponseValidator;
use thiserror::Error;
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

use crate::repository::HomeworkRepository;
use crate::service::Notifier;

/// Reasons a cycle ends before reaching the change decision
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What a completed cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no submissions since the cursor
    NoUpdates,
    /// The newest submission has the status that was already notified
    Unchanged,
    /// A status change was delivered
    Notified,
    /// A status change was detected but delivery failed
    NotificationFailed,
}

/// Current local time as epoch seconds
pub fn current_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Fixed-interval poll loop
///
/// Exclusively owns the poll cursor and the notification state.
pub struct StatusPoller {
    homeworks: Arc<dyn HomeworkRepository>,
    notifier: Notifier,
    retry_interval: Duration,
    cursor: PollCursor,
    state: NotificationState,
    /// Text of the last failure reported to the recipient
    last_failure: Option<String>,
}

impl StatusPoller {
    /// Creates a poller starting at `cursor` with an empty notification state
    pub fn new(
        homeworks: Arc<dyn HomeworkRepository>,
        notifier: Notifier,
        retry_interval: Duration,
        cursor: PollCursor,
    ) -> Self {
        Self {
            homeworks,
            notifier,
            retry_interval,
            cursor,
            state: NotificationState::new(),
            last_failure: None,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Runs cycles until `shutdown` resolves
    ///
    /// Shutdown is only observed while sleeping between cycles.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Starting status poller (interval: {:?}, cursor: {})",
            self.retry_interval, self.cursor
        );

        tokio::pin!(shutdown);

        loop {
            self.tick().await;

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping status poller");
                    break;
                }
                _ = time::sleep(self.retry_interval) => {}
            }
        }
    }

    /// Runs one cycle, absorbing any failure
    ///
    /// Returns the outcome of a completed cycle, or `None` if it ended early.
    pub async fn tick(&mut self) -> Option<CycleOutcome> {
        match self.poll_once().await {
            Ok(outcome) => {
                debug!(?outcome, cursor = %self.cursor, "Poll cycle finished");
                self.last_failure = None;
                Some(outcome)
            }
            Err(e) => {
                self.report_failure(&e).await;
                None
            }
        }
    }

    /// Performs a single poll cycle
    ///
    /// The cursor moves only when fetch and validation both succeed; a failed
    /// notification still advances it.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        debug!(cursor = %self.cursor, "Polling for homework updates");

        let response = self.homeworks.fetch_since(self.cursor).await?;
        let record = ResponseValidator::extract(&response)?;

        let outcome = match record {
            Some(record) => self.notify_if_changed(&record).await,
            None => {
                debug!("No new homework statuses");
                CycleOutcome::NoUpdates
            }
        };

        self.advance_cursor(&response);
        Ok(outcome)
    }

    async fn notify_if_changed(&mut self, record: &SubmissionRecord) -> CycleOutcome {
        let state = std::mem::take(&mut self.state);
        let (changed, state) = ChangeDetector::should_notify(record, state);
        self.state = state;

        if !changed {
            debug!(homework = %record.name, status = %record.status, "Status unchanged");
            return CycleOutcome::Unchanged;
        }

        info!(homework = %record.name, status = %record.status, "Homework status changed");

        if let Err(unknown) = StatusCatalog::describe(&record.status) {
            warn!(homework = %record.name, "{}, sending fallback verdict", unknown);
        }

        match self.notifier.send(&message::status_changed(record)).await {
            Ok(_) => CycleOutcome::Notified,
            Err(_) => CycleOutcome::NotificationFailed,
        }
    }

    fn advance_cursor(&mut self, response: &PollResponse) {
        let next = match response.current_date() {
            Some(timestamp) => timestamp,
            None => {
                warn!("Response has no usable current_date, falling back to local clock");
                current_timestamp()
            }
        };

        if self.cursor.advance_to(next) {
            debug!(cursor = %self.cursor, "Advanced poll cursor");
        }
    }

    /// Logs a failed cycle and reports it to the recipient once per distinct error
    async fn report_failure(&mut self, err: &CycleError) {
        match err {
            CycleError::Fetch(FetchError::ServerError {
                status,
                headers,
                body,
            }) => {
                error!(status, ?headers, %body, "Poll cycle failed: homework API error");
            }
            CycleError::Fetch(e) if e.is_unreachable() => warn!("Poll cycle failed: {}", e),
            CycleError::Fetch(e) => error!("Poll cycle failed: {}", e),
            CycleError::Validation(e) => error!("Poll cycle failed: invalid response: {}", e),
        }

        let text = message::cycle_failed(err);
        if self.last_failure.as_deref() == Some(text.as_str()) {
            debug!("Failure already reported, not notifying again");
            return;
        }

        if self.notifier.send(&text).await.is_ok() {
            self.last_failure = Some(text);
        }
    }
}
