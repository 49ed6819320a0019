//! Telegram Bot API
//!
//! Sends plain-text messages to a chat via `sendMessage`.

use homework_core::dto::telegram::{ApiEnvelope, SendMessageRequest, SentMessage};
use reqwest::Client;
use std::fmt;
use tracing::debug;

use crate::error::SendError;

/// Production base URL of the Bot API
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Confirmation that the messenger accepted a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub message_id: i64,
}

/// HTTP client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    /// Base URL of the Bot API (e.g., "https://api.telegram.org")
    base_url: String,
    /// Bot token, part of every method URL
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a new Bot API client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Bot API
    /// * `token` - Bot token issued by BotFather
    /// * `client` - A configured reqwest Client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Send `text` to `chat_id`
    ///
    /// Any rejection, transport failure or unreadable answer is reported as
    /// [`SendError::DeliveryFailed`].
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Ack, SendError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        debug!(chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: chat_id.to_string(),
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiEnvelope<SentMessage> = serde_json::from_str(&body).map_err(|e| {
            SendError::DeliveryFailed(format!(
                "unreadable Bot API answer (status {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        if !status.is_success() || !envelope.ok {
            let reason = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(SendError::DeliveryFailed(format!(
                "Bot API rejected the message (status {}): {}",
                status.as_u16(),
                reason
            )));
        }

        let sent = envelope.result.ok_or_else(|| {
            SendError::DeliveryFailed("Bot API answer has no result".to_string())
        })?;

        Ok(Ack {
            message_id: sent.message_id,
        })
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
