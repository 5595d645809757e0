use crate::error::{Result, ScanError};
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// HTTP settings for the single page request.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: format!("onpage/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Why a page could not be retrieved. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    ConnectTimeout,
    Timeout,
    TooManyRedirects,
    EmptyBody,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            UnavailableReason::ConnectTimeout => "connection timed out",
            UnavailableReason::Timeout => "request timed out",
            UnavailableReason::TooManyRedirects => "too many redirects",
            UnavailableReason::EmptyBody => "empty response body",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Body(String),
    Unavailable(UnavailableReason),
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self { client })
    }

    /// Issues one GET for `url` and returns the body.
    ///
    /// Timeouts and redirect loops come back as [`FetchOutcome::Unavailable`];
    /// any other transport fault is returned as [`ScanError::Fetch`].
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify(url, e),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return classify(url, e),
        };
        debug!(
            "Fetched {} ({}, {} bytes) in {:?}",
            url,
            status,
            body.len(),
            start.elapsed()
        );

        if body.is_empty() {
            warn!("{} returned an empty body", url);
            return Ok(FetchOutcome::Unavailable(UnavailableReason::EmptyBody));
        }

        Ok(FetchOutcome::Body(body))
    }
}

fn classify(url: &str, error: reqwest::Error) -> Result<FetchOutcome> {
    match unavailable_reason(&error) {
        Some(reason) => {
            warn!("{} unavailable: {}", url, reason);
            Ok(FetchOutcome::Unavailable(reason))
        }
        None => Err(ScanError::Fetch(error)),
    }
}

fn unavailable_reason(error: &reqwest::Error) -> Option<UnavailableReason> {
    if error.is_redirect() {
        Some(UnavailableReason::TooManyRedirects)
    } else if error.is_timeout() && error.is_connect() {
        Some(UnavailableReason::ConnectTimeout)
    } else if error.is_timeout() {
        Some(UnavailableReason::Timeout)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn fast_config() -> FetchConfig {
        FetchConfig::default()
            .with_timeout(Duration::from_millis(300))
            .with_connect_timeout(Duration::from_millis(300))
            .with_max_redirects(3)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html><body>hi</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let outcome = fetcher.fetch(&mock_server.uri()).await.unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Body("<html><body>hi</body></html>".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_error_status_still_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<title>Not Found</title>"))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let outcome = fetcher
            .fetch(&format!("{}/missing", mock_server.uri()))
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::Body(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let outcome = fetcher.fetch(&mock_server.uri()).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Unavailable(UnavailableReason::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_redirect_loop_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/loop"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "/loop"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let outcome = fetcher
            .fetch(&format!("{}/loop", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Unavailable(UnavailableReason::TooManyRedirects)
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let outcome = fetcher.fetch(&mock_server.uri()).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Unavailable(UnavailableReason::EmptyBody));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_propagates() {
        // Nothing listens on port 1
        let fetcher = Fetcher::new(&fast_config()).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/").await;

        assert!(matches!(result, Err(ScanError::Fetch(_))));
    }
}
