//! Configuration types for extraction, validation, and enrichment.

use std::time::Duration;

/// Desktop-Chrome user agent used for browser-like requests.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// `Accept-Language` sent with browser-like requests.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// User agent for plain (non-browser) fetches.
pub const PLAIN_USER_AGENT: &str = concat!("article-digest/", env!("CARGO_PKG_VERSION"));

/// Configuration for the extraction strategies.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Timeout for HTML page fetches. Default: 15s.
    pub html_timeout: Duration,

    /// Timeout for binary document fetches. Default: 30s.
    pub pdf_timeout: Duration,

    /// Transcript languages accepted without translation, in preference order.
    pub transcript_languages: Vec<String>,

    /// Language untranslated transcripts are translated into.
    pub translation_target: String,

    /// Transcripts must be longer than this (in characters) to be used.
    pub min_transcript_chars: usize,

    /// Page metadata must be longer than this (in characters) to be used.
    pub min_metadata_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            html_timeout: Duration::from_secs(15),
            pdf_timeout: Duration::from_secs(30),
            transcript_languages: vec!["en".into(), "en-US".into(), "en-GB".into()],
            translation_target: "en".into(),
            min_transcript_chars: 50,
            min_metadata_chars: 30,
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML fetch timeout.
    pub fn with_html_timeout(mut self, timeout: Duration) -> Self {
        self.html_timeout = timeout;
        self
    }

    /// Set the PDF fetch timeout.
    pub fn with_pdf_timeout(mut self, timeout: Duration) -> Self {
        self.pdf_timeout = timeout;
        self
    }
}

/// Bounds enforced by the content gate.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Minimum usable length in characters. Default: 50.
    pub min_chars: usize,

    /// Maximum length in characters before truncation. Default: 30,000.
    pub max_chars: usize,

    /// Appended after truncated text.
    pub truncation_marker: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            max_chars: 30_000,
            truncation_marker: "... [Truncated]".into(),
        }
    }
}

/// Model settings for the two enrichment calls.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Model identifier passed to the oracle.
    pub model: String,

    /// Temperature for the summary call. Default: 0.4.
    pub summary_temperature: f32,

    /// Temperature for the topic call. Default: 0.2.
    pub topic_temperature: f32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".into(),
            summary_temperature: 0.4,
            topic_temperature: 0.2,
        }
    }
}

impl EnrichmentConfig {
    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
