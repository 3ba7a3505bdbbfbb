//! PDF strategy: binary fetch, then page-by-page text extraction.

use std::sync::Arc;

use lopdf::Document;
use tracing::{debug, info};
use url::Url;

use crate::error::{ExtractionError, StrategyResult};
use crate::traits::fetcher::{FetchRequest, PageFetcher};
use crate::types::config::ExtractionConfig;
use crate::types::content::ExtractionResult;

/// Title used when the URL has no usable file name.
pub const DEFAULT_PDF_TITLE: &str = "PDF Document";

pub struct PdfStrategy {
    fetcher: Arc<dyn PageFetcher>,
    config: ExtractionConfig,
}

impl PdfStrategy {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ExtractionConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn extract(&self, url: &str) -> StrategyResult<ExtractionResult> {
        let bytes = self
            .fetcher
            .fetch_bytes(&FetchRequest::browser(url, self.config.pdf_timeout))
            .await?;

        let text = extract_pdf_text(&bytes)?;
        info!(url = %url, chars = text.chars().count(), "Extracted PDF text");

        Ok(ExtractionResult::new(pdf_title(url), text))
    }
}

/// Text of every page, each followed by a newline.
///
/// A page whose text cannot be decoded contributes an empty line rather than
/// failing the document.
pub fn extract_pdf_text(bytes: &[u8]) -> StrategyResult<String> {
    let document = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => debug!(page = page_number, error = %e, "No text on PDF page"),
        }
        text.push('\n');
    }
    Ok(text)
}

/// Title derived from the file name in the URL.
pub fn pdf_title(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => url.rsplit('/').next().unwrap_or_default().to_string(),
    };

    let name = segment.replace("%20", " ");
    let stem = if name.to_ascii_lowercase().ends_with(".pdf") {
        &name[..name.len() - 4]
    } else {
        name.as_str()
    };

    let stem = stem.trim();
    if stem.is_empty() {
        DEFAULT_PDF_TITLE.to_string()
    } else {
        stem.to_string()
    }
}
