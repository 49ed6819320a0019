//! In-memory repositories for scheduler and service tests

use async_trait::async_trait;
use homework_client::{Ack, FetchError, SendError};
use homework_core::domain::cursor::PollCursor;
use homework_core::domain::submission::PollResponse;
use homework_core::message::MAX_MESSAGE_CHARS;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::repository::{HomeworkRepository, MessageRepository};

/// Replays scripted poll results and records requested cursors
#[derive(Default)]
pub struct FakeHomeworks {
    responses: Mutex<VecDeque<Result<PollResponse, FetchError>>>,
    requested: Mutex<Vec<u64>>,
}

impl FakeHomeworks {
    pub fn push_body(&self, body: JsonValue) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(PollResponse::new(body)));
    }

    pub fn push_error(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Cursor values of every fetch so far
    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeworkRepository for FakeHomeworks {
    async fn fetch_since(&self, cursor: PollCursor) -> Result<PollResponse, FetchError> {
        self.requested.lock().unwrap().push(cursor.timestamp());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unreachable("no scripted response".to_string())))
    }
}

/// Records delivered messages; can be switched to reject everything
///
/// Like the Bot API, rejects texts longer than [`MAX_MESSAGE_CHARS`].
#[derive(Default)]
pub struct FakeMessenger {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl FakeMessenger {
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of delivered messages
    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl MessageRepository for FakeMessenger {
    async fn send(&self, recipient: &str, text: &str) -> Result<Ack, SendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SendError::DeliveryFailed("chat not found".to_string()));
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SendError::DeliveryFailed("message is too long".to_string()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push((recipient.to_string(), text.to_string()));
        Ok(Ack {
            message_id: sent.len() as i64,
        })
    }
}
