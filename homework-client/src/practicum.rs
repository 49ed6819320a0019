//! Homework review API
//!
//! One authenticated GET per poll, asking for submissions updated after a
//! given timestamp.

use homework_core::domain::submission::PollResponse;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{FetchError, excerpt};

/// Production endpoint of the homework status API
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// HTTP client for the homework review API
#[derive(Clone)]
pub struct PracticumClient {
    /// Full URL of the homework statuses endpoint
    endpoint: String,
    /// OAuth token of the student
    token: String,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a new homework API client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework statuses endpoint
    /// * `token` - OAuth token sent in the `Authorization` header
    /// * `client` - A configured reqwest Client (see [`crate::build_http_client`])
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint this client polls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch submissions updated after `since` (epoch seconds)
    ///
    /// # Errors
    /// * [`FetchError::Unreachable`] on transport failures and timeouts
    /// * [`FetchError::ServerError`] on any non-2xx answer
    /// * [`FetchError::MalformedPayload`] if the body is not JSON
    pub async fn fetch(&self, since: u64) -> Result<PollResponse, FetchError> {
        debug!(from_date = since, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Homework API responded");

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(status = status.as_u16(), ?headers, %body, "Homework API returned an error");
            return Err(FetchError::server_error(status.as_u16(), headers, body));
        }

        let body = response.text().await?;
        let value: JsonValue = serde_json::from_str(&body).map_err(|e| {
            warn!(%body, "Homework API returned a non-JSON body");
            FetchError::MalformedPayload(format!("{} (body: {})", e, excerpt(&body)))
        })?;

        Ok(PollResponse::new(value))
    }
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_http_client;
    use crate::test_support::{closed_port_url, spawn_stub};
    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    const PATH: &str = "/api/user_api/homework_statuses/";

    fn client_for(base_url: &str, timeout: Duration) -> PracticumClient {
        PracticumClient::new(
            format!("{}{}", base_url, PATH),
            "student-token",
            build_http_client(timeout).unwrap(),
        )
    }

    async fn echo_request(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, String) {
        let body = json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1700000000,
            "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
            "from_date": params.get("from_date"),
        });
        (StatusCode::OK, body.to_string())
    }

    #[tokio::test]
    async fn test_fetch_success_sends_auth_and_cursor() {
        let base = spawn_stub(Router::new().route(PATH, get(echo_request))).await;
        let client = client_for(&base, Duration::from_secs(5));

        let response = client.fetch(1_549_962_000).await.unwrap();

        assert_eq!(response.current_date(), Some(1_700_000_000));
        assert_eq!(response.body()["authorization"], "OAuth student-token");
        assert_eq!(response.body()["from_date"], "1549962000");
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let router = Router::new().route(
            PATH,
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client.fetch(0).await.unwrap_err();

        match err {
            FetchError::ServerError {
                status,
                headers,
                body,
            } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream down");
                assert!(headers.contains_key("content-type"));
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let router = Router::new().route(PATH, get(|| async { "<html>maintenance</html>" }));
        let base = spawn_stub(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client.fetch(0).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let base = closed_port_url().await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client.fetch(0).await.unwrap_err();
        assert!(err.is_unreachable());
        let text = err.to_string();
        assert!(text.contains("connection failed"), "{}", text);
        assert_ne!(
            text, "homework API is unreachable: error sending request",
            "cause chain is missing"
        );
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_unreachable() {
        let router = Router::new().route(
            PATH,
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base, Duration::from_millis(200));

        let err = client.fetch(0).await.unwrap_err();
        assert!(err.is_unreachable());
        assert!(err.to_string().contains("timed out"), "{}", err);
    }

    #[tokio::test]
    async fn test_fetch_long_error_body_is_cut_in_message() {
        let router = Router::new().route(
            PATH,
            get(|| async { (StatusCode::BAD_GATEWAY, "x".repeat(10_000)) }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client.fetch(0).await.unwrap_err();

        assert!(err.to_string().chars().count() < 400);
        match err {
            FetchError::ServerError { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), 10_000);
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = PracticumClient::new(DEFAULT_ENDPOINT, "secret", Client::new());
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
