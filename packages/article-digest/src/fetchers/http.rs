//! `reqwest`-backed fetcher.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{FetchProfile, FetchRequest, PageFetcher};
use crate::types::config::{self, BROWSER_USER_AGENT, PLAIN_USER_AGENT};

/// HTTP fetcher with a plain and a browser-like header profile.
///
/// # Example
///
/// ```rust,ignore
/// use article_digest::fetchers::HttpFetcher;
/// use article_digest::traits::fetcher::{FetchRequest, PageFetcher};
///
/// let fetcher = HttpFetcher::new();
/// let html = fetcher
///     .fetch_text(&FetchRequest::browser("https://example.com", Duration::from_secs(15)))
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, custom TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn headers(profile: FetchProfile) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match profile {
            FetchProfile::Plain => {
                headers.insert(USER_AGENT, HeaderValue::from_static(PLAIN_USER_AGENT));
            }
            FetchProfile::Browser => {
                headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
                headers.insert(
                    ACCEPT_LANGUAGE,
                    HeaderValue::from_static(config::ACCEPT_LANGUAGE),
                );
                headers.insert(
                    ACCEPT,
                    HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
            }
        }
        headers
    }

    async fn send(&self, request: &FetchRequest) -> FetchResult<reqwest::Response> {
        debug!(url = %request.url, profile = ?request.profile, "HTTP fetch starting");

        let response = self
            .client
            .get(&request.url)
            .headers(Self::headers(request.profile))
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %request.url, error = %e, "HTTP request failed");
                FetchError::from_reqwest(&request.url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %request.url, status = status.as_u16(), "HTTP error status");
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, request: &FetchRequest) -> FetchResult<String> {
        let response = self.send(request).await?;
        response.text().await.map_err(|e| FetchError::Body {
            url: request.url.clone(),
            message: e.to_string(),
        })
    }

    async fn fetch_bytes(&self, request: &FetchRequest) -> FetchResult<Vec<u8>> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| FetchError::Body {
            url: request.url.clone(),
            message: e.to_string(),
        })?;
        debug!(url = %request.url, bytes = bytes.len(), "HTTP fetch complete");
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}
