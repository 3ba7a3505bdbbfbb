//! HTTP fetch abstraction used by every extraction strategy.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchResult;

/// Header set sent with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchProfile {
    /// Library user agent, no language preference
    Plain,

    /// Desktop-Chrome user agent with an English `Accept-Language`
    Browser,
}

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub timeout: Duration,
    pub profile: FetchProfile,
}

impl FetchRequest {
    /// Browser-like request.
    pub fn browser(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            profile: FetchProfile::Browser,
        }
    }

    /// Plain request.
    pub fn plain(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            profile: FetchProfile::Plain,
        }
    }
}

/// Fetches pages and documents.
///
/// Implementations must return `FetchError::Status` for any non-2xx response.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET the URL and decode the body as text.
    async fn fetch_text(&self, request: &FetchRequest) -> FetchResult<String>;

    /// GET the URL and return the raw body.
    async fn fetch_bytes(&self, request: &FetchRequest) -> FetchResult<Vec<u8>>;

    /// Name of this fetcher (for logging).
    fn name(&self) -> &str;
}
