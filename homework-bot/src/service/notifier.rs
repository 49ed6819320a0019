//! Notifier service
//!
//! Delivers formatted messages to the fixed recipient chat. Delivery
//! failures are logged and returned, never swallowed.

use homework_client::{Ack, SendError};
use std::sync::Arc;
use tracing::{error, info};

use crate::repository::MessageRepository;

/// Sends messages to one configured recipient
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessageRepository>,
    recipient: String,
}

impl Notifier {
    /// Creates a notifier bound to `recipient`
    pub fn new(messenger: Arc<dyn MessageRepository>, recipient: impl Into<String>) -> Self {
        Self {
            messenger,
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Sends `message` to the recipient
    pub async fn send(&self, message: &str) -> Result<Ack, SendError> {
        info!(recipient = %self.recipient, "Sending notification");

        match self.messenger.send(&self.recipient, message).await {
            Ok(ack) => {
                info!(message_id = ack.message_id, text = %message, "Notification delivered");
                Ok(ack)
            }
            Err(e) => {
                error!(recipient = %self.recipient, "Notification not delivered: {}", e);
                Err(e)
            }
        }
    }
}
