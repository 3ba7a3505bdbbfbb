//! Generic web strategy: main-content extraction with a visible-text fallback.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::error::StrategyResult;
use crate::extractors::html::{page_title, visible_text};
use crate::traits::content::ContentExtractor;
use crate::traits::fetcher::{FetchRequest, PageFetcher};
use crate::types::config::ExtractionConfig;
use crate::types::content::ExtractionResult;

/// Title used when the page has no `<title>`.
pub const DEFAULT_WEB_TITLE: &str = "Web Article";

pub struct WebStrategy {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn ContentExtractor>,
    config: ExtractionConfig,
}

impl WebStrategy {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn ContentExtractor>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    pub async fn extract(&self, url: &str) -> StrategyResult<ExtractionResult> {
        let html = self.fetch_page(url).await?;
        Ok(self.extract_from_html(&html, url))
    }

    /// Plain fetch first, then a browser-like retry.
    async fn fetch_page(&self, url: &str) -> StrategyResult<String> {
        let plain = FetchRequest::plain(url, self.config.html_timeout);
        match self.fetcher.fetch_text(&plain).await {
            Ok(html) => Ok(html),
            Err(e) => {
                warn!(url = %url, error = %e, "Plain fetch failed, retrying with browser headers");
                let browser = FetchRequest::browser(url, self.config.html_timeout);
                Ok(self.fetcher.fetch_text(&browser).await?)
            }
        }
    }

    /// Title plus main content (or all visible text when extraction finds nothing).
    pub fn extract_from_html(&self, html: &str, url: &str) -> ExtractionResult {
        let document = Html::parse_document(html);
        let title = page_title(&document).unwrap_or_else(|| DEFAULT_WEB_TITLE.to_string());

        let text = match self.extractor.extract(html, url) {
            Some(text) if !text.trim().is_empty() => {
                info!(extractor = self.extractor.name(), chars = text.chars().count(), "Extracted main content");
                text
            }
            _ => {
                debug!(extractor = self.extractor.name(), "No main content, using visible page text");
                visible_text(&document)
            }
        };

        ExtractionResult::new(title, text)
    }
}
