//! Front page download.
//!
//! The pipeline talks to the network through the [`PageSource`] trait so the
//! extraction path can be driven by canned or failing sources. [`HttpFetcher`]
//! is the real implementation: one GET, a desktop browser user agent,
//! transparent gzip/deflate, a bounded timeout and no retries.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// User agent sent with every request; the site serves a reduced page to bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Everything that can go wrong while downloading the page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No complete response within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS, redirect or protocol failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server answered {0}")]
    Status(StatusCode),

    /// The body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Something that can hand back the HTML of a page.
pub trait PageSource {
    /// Fetch `url` and return the full body text.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageSource`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(err)
        } else {
            FetchError::Request(err)
        }
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        info!(status = %status, content_length = ?response.content_length(), "[GET] ok");

        // The body is read to the end inside this call, so the connection is
        // released on every path out of it.
        response.text().await.map_err(|e| self.classify(e))
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "info", skip(self), fields(timeout = ?self.timeout))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        info!("[GET] requesting page");
        match self.get(url).await {
            Ok(body) => {
                info!(bytes = body.len(), "[GET] body received");
                Ok(body)
            }
            Err(e) => {
                warn!(error = %e, "[GET] failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn sends_browser_user_agent(req: &Request) -> bool {
        req.headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            == Some(BROWSER_USER_AGENT)
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(sends_browser_user_agent)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Новости</body></html>"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT).unwrap();
        let body = fetcher.fetch_page(&format!("{}/", server.uri())).await.unwrap();
        assert_eq!(body, "<html><body>Новости</body></html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT).unwrap();
        let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch_page("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_) | FetchError::Timeout(_)));
    }
}
