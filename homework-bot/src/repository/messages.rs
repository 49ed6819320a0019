//! Messages repository

use async_trait::async_trait;
use homework_client::{Ack, SendError, TelegramClient};

/// Outbound text messaging
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Delivers `text` to `recipient`
    async fn send(&self, recipient: &str, text: &str) -> Result<Ack, SendError>;
}

#[async_trait]
impl MessageRepository for TelegramClient {
    async fn send(&self, recipient: &str, text: &str) -> Result<Ack, SendError> {
        self.send_message(recipient, text).await
    }
}
