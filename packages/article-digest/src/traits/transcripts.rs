//! Video transcript abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranscriptResult;

/// One caption track offered for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTrack {
    pub video_id: String,

    /// BCP-47-ish code as reported by the provider ("en", "en-US", "de")
    pub language_code: String,

    /// Auto-generated (ASR) rather than uploaded captions
    pub is_generated: bool,

    /// Whether the provider can machine-translate this track
    pub is_translatable: bool,

    /// Provider URL for the timed text
    pub base_url: String,

    /// Target language when this is a translated view of another track
    pub translated_to: Option<String>,
}

impl TranscriptTrack {
    /// Machine-translated view of this track, if the provider offers one.
    pub fn translated(&self, language: &str) -> Option<TranscriptTrack> {
        if !self.is_translatable || self.translated_to.is_some() {
            return None;
        }
        Some(TranscriptTrack {
            translated_to: Some(language.to_string()),
            ..self.clone()
        })
    }
}

/// A single timed caption fragment. Only `text` is consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSnippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSnippet {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Lists and downloads transcripts for a video id.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// All tracks available for the video, in provider order.
    async fn list(&self, video_id: &str) -> TranscriptResult<Vec<TranscriptTrack>>;

    /// Download the fragments of a track (translated when `translated_to` is set).
    async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<TranscriptSnippet>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(translatable: bool) -> TranscriptTrack {
        TranscriptTrack {
            video_id: "abc".into(),
            language_code: "de".into(),
            is_generated: false,
            is_translatable: translatable,
            base_url: "https://www.youtube.com/api/timedtext?v=abc&lang=de".into(),
            translated_to: None,
        }
    }

    #[test]
    fn test_translated_view() {
        let translated = track(true).translated("en").unwrap();
        assert_eq!(translated.translated_to.as_deref(), Some("en"));
        assert_eq!(translated.language_code, "de");

        // no translating a translation
        assert!(translated.translated("fr").is_none());
    }

    #[test]
    fn test_untranslatable_track() {
        assert!(track(false).translated("en").is_none());
    }
}
