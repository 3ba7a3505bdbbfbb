//! YouTube strategy: transcript first, page metadata as fallback.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, StrategyResult};
use crate::extractors::html::{meta_name, meta_property, page_title};
use crate::traits::fetcher::{FetchRequest, PageFetcher};
use crate::traits::transcripts::{TranscriptSource, TranscriptTrack};
use crate::types::config::ExtractionConfig;
use crate::types::content::ExtractionResult;

/// Title used when the watch page carries none.
pub const DEFAULT_VIDEO_TITLE: &str = "YouTube Video";

const TITLE_SUFFIX: &str = "- YouTube";

/// Title and description scraped from a watch page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: Option<String>,
}

impl VideoMetadata {
    /// `"{title}\n\n{description}"`, trimmed.
    pub fn combined(&self) -> String {
        format!(
            "{}\n\n{}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

pub struct YouTubeStrategy {
    fetcher: Arc<dyn PageFetcher>,
    transcripts: Arc<dyn TranscriptSource>,
    config: ExtractionConfig,
}

impl YouTubeStrategy {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        transcripts: Arc<dyn TranscriptSource>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            fetcher,
            transcripts,
            config,
        }
    }

    pub async fn extract(&self, video_id: &str, url: &str) -> StrategyResult<ExtractionResult> {
        let transcript = self.transcript_text(video_id).await;
        let metadata = self.metadata(url).await?;

        if let Some(text) = transcript {
            if text.chars().count() > self.config.min_transcript_chars {
                info!(video_id = %video_id, chars = text.chars().count(), "Using transcript");
                return Ok(ExtractionResult::new(metadata.title, text));
            }
            debug!(video_id = %video_id, "Transcript too short, trying metadata");
        }

        let combined = metadata.combined();
        if combined.chars().count() > self.config.min_metadata_chars {
            info!(video_id = %video_id, "Using video title and description");
            return Ok(ExtractionResult::new(metadata.title, combined));
        }

        Err(ExtractionError::InsufficientYouTubeContent)
    }

    /// Full transcript text, or `None` when no transcript could be obtained.
    pub async fn transcript_text(&self, video_id: &str) -> Option<String> {
        let tracks = match self.transcripts.list(video_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                debug!(video_id = %video_id, error = %e, "No transcript list");
                return None;
            }
        };

        let original = self.choose_track(&tracks)?;
        let snippets = match self.translation_of(original) {
            Some(translated) => match self.transcripts.fetch(&translated).await {
                Ok(snippets) => snippets,
                Err(e) => {
                    warn!(
                        video_id = %video_id,
                        language = %original.language_code,
                        error = %e,
                        "Translation failed, using original language"
                    );
                    self.transcripts.fetch(original).await.ok()?
                }
            },
            None => match self.transcripts.fetch(original).await {
                Ok(snippets) => snippets,
                Err(e) => {
                    debug!(video_id = %video_id, error = %e, "Transcript fetch failed");
                    return None;
                }
            },
        };

        let text = snippets
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        Some(text)
    }

    /// Preferred-language track (manual before generated), else the first track.
    fn choose_track<'a>(&self, tracks: &'a [TranscriptTrack]) -> Option<&'a TranscriptTrack> {
        for generated in [false, true] {
            for language in &self.config.transcript_languages {
                if let Some(track) = tracks
                    .iter()
                    .find(|t| t.is_generated == generated && &t.language_code == language)
                {
                    return Some(track);
                }
            }
        }
        tracks.first()
    }

    /// Translated view of a track outside the preferred languages.
    fn translation_of(&self, track: &TranscriptTrack) -> Option<TranscriptTrack> {
        if self
            .config
            .transcript_languages
            .iter()
            .any(|l| l == &track.language_code)
        {
            return None;
        }
        track.translated(&self.config.translation_target)
    }

    async fn metadata(&self, url: &str) -> StrategyResult<VideoMetadata> {
        let html = self
            .fetcher
            .fetch_text(&FetchRequest::browser(url, self.config.html_timeout))
            .await?;
        Ok(parse_video_metadata(&html))
    }
}

/// Title and description from a watch page.
pub fn parse_video_metadata(html: &str) -> VideoMetadata {
    let document = Html::parse_document(html);

    let title = meta_property(&document, "og:title")
        .or_else(|| {
            page_title(&document).map(|t| t.replace(TITLE_SUFFIX, "").trim().to_string())
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string());

    let description = meta_property(&document, "og:description")
        .or_else(|| meta_name(&document, "description"));

    VideoMetadata { title, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::testing::{MockFetcher, MockTranscripts};
    use crate::traits::transcripts::TranscriptSnippet;

    const URL: &str = "https://www.youtube.com/watch?v=abc";

    fn page(title: &str, description: &str) -> String {
        format!(
            r#"<html><head><title>{title} - YouTube</title>
            <meta name="description" content="{description}"></head><body></body></html>"#
        )
    }

    fn track(language: &str, generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            video_id: "abc".into(),
            language_code: language.into(),
            is_generated: generated,
            is_translatable: true,
            base_url: format!("https://captions.test/{language}/{generated}"),
            translated_to: None,
        }
    }

    fn strategy(fetcher: MockFetcher, transcripts: MockTranscripts) -> YouTubeStrategy {
        YouTubeStrategy::new(
            Arc::new(fetcher),
            Arc::new(transcripts),
            ExtractionConfig::default(),
        )
    }

    #[test]
    fn test_metadata_prefers_open_graph() {
        let html = r#"<html><head>
            <meta property="og:title" content="Moon Landing">
            <meta property="og:description" content="Footage from 1969">
            <title>Other - YouTube</title></head></html>"#;
        let meta = parse_video_metadata(html);

        assert_eq!(meta.title, "Moon Landing");
        assert_eq!(meta.description.as_deref(), Some("Footage from 1969"));
        assert_eq!(meta.combined(), "Moon Landing\n\nFootage from 1969");
    }

    #[test]
    fn test_metadata_falls_back_to_title_tag() {
        let meta = parse_video_metadata(&page("Moon Landing", "desc"));
        assert_eq!(meta.title, "Moon Landing");
        assert_eq!(meta.description.as_deref(), Some("desc"));

        let meta = parse_video_metadata("<html><body></body></html>");
        assert_eq!(meta.title, DEFAULT_VIDEO_TITLE);
        assert_eq!(meta.combined(), DEFAULT_VIDEO_TITLE);
    }

    #[tokio::test]
    async fn test_english_transcript_preferred() {
        let transcripts = MockTranscripts::new()
            .with_tracks("abc", vec![track("de", false), track("en", true)])
            .with_snippets(
                &track("en", true),
                vec![
                    TranscriptSnippet::new("we choose to go to the moon", 0.0, 2.0),
                    TranscriptSnippet::new("in this decade and do the other things", 2.0, 3.0),
                ],
            );
        let fetcher = MockFetcher::new().with_page(URL, page("Moon Speech", ""));

        let result = strategy(fetcher, transcripts)
            .extract("abc", URL)
            .await
            .unwrap();

        assert_eq!(result.title, "Moon Speech");
        assert_eq!(
            result.text,
            "we choose to go to the moon in this decade and do the other things"
        );
    }

    #[tokio::test]
    async fn test_foreign_transcript_is_translated() {
        let german = track("de", false);
        let transcripts = MockTranscripts::new()
            .with_tracks("abc", vec![german.clone()])
            .with_snippets(
                &german.translated("en").unwrap(),
                vec![TranscriptSnippet::new("translated text", 0.0, 1.0)],
            );
        let fetcher = MockFetcher::new().with_page(URL, page("T", ""));

        let text = strategy(fetcher, transcripts).transcript_text("abc").await;
        assert_eq!(text.as_deref(), Some("translated text"));
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_original() {
        let german = track("de", false);
        let transcripts = MockTranscripts::new()
            .with_tracks("abc", vec![german.clone()])
            .with_snippets(&german, vec![TranscriptSnippet::new("guten Tag", 0.0, 1.0)]);
        let fetcher = MockFetcher::new();

        let text = strategy(fetcher, transcripts).transcript_text("abc").await;
        assert_eq!(text.as_deref(), Some("guten Tag"));
    }

    #[tokio::test]
    async fn test_metadata_fallback_when_no_transcript() {
        let fetcher = MockFetcher::new().with_page(
            URL,
            page("Moon Landing", "Restored footage of the Apollo 11 landing"),
        );

        let result = strategy(fetcher, MockTranscripts::new())
            .extract("abc", URL)
            .await
            .unwrap();

        assert_eq!(result.title, "Moon Landing");
        assert_eq!(
            result.text,
            "Moon Landing\n\nRestored footage of the Apollo 11 landing"
        );
    }

    #[tokio::test]
    async fn test_insufficient_content() {
        let fetcher = MockFetcher::new().with_page(URL, page("Short", ""));

        let err = strategy(fetcher, MockTranscripts::new())
            .extract("abc", URL)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::InsufficientYouTubeContent));
    }

    #[tokio::test]
    async fn test_watch_page_error_fails_strategy() {
        let fetcher = MockFetcher::new().with_status(URL, 429);

        let err = strategy(fetcher, MockTranscripts::new())
            .extract("abc", URL)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExtractionError::Network(FetchError::Status { status: 429, .. })
        ));
    }
}
