use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failure for a single request. Not fatal on its own: the
/// caller decides whether to skip the call or the whole question.
#[derive(Debug, Error)]
#[error("GET {url} failed: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

impl FetchError {
    fn new(url: &str, source: reqwest::Error) -> Self {
        Self {
            url: url.to_string(),
            source,
        }
    }
}

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a client with the session cookie attached to every request.
    /// The cookie may be empty; public answers are served without one.
    pub fn new(cookie: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(cookie).context("cookie contains invalid header characters")?,
        );
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch a URL and return the response body as text. No retries; any
    /// transport error is handed back for the caller to branch on. HTTP
    /// error statuses are not special-cased, the body goes through
    /// extraction either way and simply yields no matches.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, e))?;
        resp.text().await.map_err(|e| FetchError::new(url, e))
    }
}
