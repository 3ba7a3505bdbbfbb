//! Source-specific extraction strategies.
//!
//! Each strategy owns its fetch, parse, and fallback logic. [`Extractor`]
//! dispatches on the [`SourceKind`] chosen by the classifier.

mod pdf;
mod web;
mod youtube;

use std::sync::Arc;

pub use pdf::{extract_pdf_text, pdf_title, PdfStrategy, DEFAULT_PDF_TITLE};
pub use web::{WebStrategy, DEFAULT_WEB_TITLE};
pub use youtube::{parse_video_metadata, VideoMetadata, YouTubeStrategy, DEFAULT_VIDEO_TITLE};

use crate::classify::SourceKind;
use crate::error::StrategyResult;
use crate::traits::content::ContentExtractor;
use crate::traits::fetcher::PageFetcher;
use crate::traits::transcripts::TranscriptSource;
use crate::types::config::ExtractionConfig;
use crate::types::content::ExtractionResult;

/// The three strategies behind one entry point.
pub struct Extractor {
    youtube: YouTubeStrategy,
    pdf: PdfStrategy,
    web: WebStrategy,
}

impl Extractor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        transcripts: Arc<dyn TranscriptSource>,
        content: Arc<dyn ContentExtractor>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            youtube: YouTubeStrategy::new(fetcher.clone(), transcripts, config.clone()),
            pdf: PdfStrategy::new(fetcher.clone(), config.clone()),
            web: WebStrategy::new(fetcher, content, config),
        }
    }

    /// Run the strategy for `kind` against `url`.
    pub async fn extract(&self, kind: &SourceKind, url: &str) -> StrategyResult<ExtractionResult> {
        match kind {
            SourceKind::YouTube { video_id } => self.youtube.extract(video_id, url).await,
            SourceKind::Pdf => self.pdf.extract(url).await,
            SourceKind::Web => self.web.extract(url).await,
        }
    }
}
