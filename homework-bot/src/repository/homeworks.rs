//! Homework statuses repository

use async_trait::async_trait;
use homework_client::{FetchError, PracticumClient};
use homework_core::domain::cursor::PollCursor;
use homework_core::domain::submission::PollResponse;

/// Source of homework status updates
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Fetches submissions updated after `cursor`
    async fn fetch_since(&self, cursor: PollCursor) -> Result<PollResponse, FetchError>;
}

#[async_trait]
impl HomeworkRepository for PracticumClient {
    async fn fetch_since(&self, cursor: PollCursor) -> Result<PollResponse, FetchError> {
        self.fetch(cursor.timestamp()).await
    }
}
