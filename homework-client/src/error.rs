//! Error types for the homework clients

use reqwest::header::HeaderMap;
use std::error::Error as StdError;
use thiserror::Error;

/// Longest body excerpt carried in error messages, in characters
const BODY_EXCERPT_CHARS: usize = 300;

/// Failures of a single poll against the homework review API
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS failure, refused connection, reset or timeout
    #[error("homework API is unreachable: {0}")]
    Unreachable(String),

    /// The API answered with a non-2xx status
    #[error("homework API error (status {status}): {}", excerpt(.body))]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response headers, kept for diagnostics
        headers: HeaderMap,
        /// Raw response body
        body: String,
    },

    /// The body is not valid JSON
    #[error("homework API returned a malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    /// Create a server error from a failed response
    pub fn server_error(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Check if the endpoint could not be reached
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(describe_transport(err))
    }
}

/// Failures delivering a message through the messenger
#[derive(Debug, Error)]
pub enum SendError {
    /// The messenger did not accept the message
    #[error("message delivery failed: {0}")]
    DeliveryFailed(String),
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        Self::DeliveryFailed(describe_transport(err))
    }
}

/// First characters of `body`, marked when cut
pub(crate) fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}… ({} chars total)", head, body.chars().count())
    } else {
        head
    }
}

/// Renders a transport error with its kind and full cause chain
///
/// The URL is stripped: Bot API URLs embed the bot token.
fn describe_transport(err: reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_body() || err.is_decode() {
        "failed to read response body"
    } else {
        "request failed"
    };

    let err = err.without_url();
    let mut message = format!("{}: {}", kind, err);
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
