//! Homework HTTP Clients
//!
//! Thin, typed HTTP clients for the two remote services the bot talks to:
//! - [`PracticumClient`]: polls the homework review API for status updates
//! - [`TelegramClient`]: delivers text messages through the Telegram Bot API
//!
//! Both clients are stateless per call and classify every failure into the
//! error types in [`error`].
//!
//! # Example
//!
//! ```no_run
//! use homework_client::{PracticumClient, build_http_client};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let http = build_http_client(Duration::from_secs(30))?;
//! let client = PracticumClient::new(
//!     "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!     "token",
//!     http,
//! );
//!
//! let response = client.fetch(1_700_000_000).await?;
//! println!("server time: {:?}", response.current_date());
//! # Ok(())
//! # }
//! ```

pub mod error;
mod practicum;
mod telegram;

// Re-export commonly used types
pub use error::{FetchError, SendError};
pub use practicum::{DEFAULT_ENDPOINT, PracticumClient};
pub use reqwest::header::HeaderMap;
pub use telegram::{Ack, DEFAULT_API_URL, TelegramClient};

use reqwest::Client;
use std::time::Duration;

/// Build the shared HTTP client used by both API clients
///
/// Every request made through it is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}
