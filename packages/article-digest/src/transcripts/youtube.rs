//! Caption tracks scraped from the YouTube watch page.
//!
//! The watch page embeds the player response, whose `captionTracks` array
//! lists every track with a signed `baseUrl`. Downloading that URL yields
//! timed-text XML; appending `tlang=<code>` asks YouTube for a machine
//! translation.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{TranscriptError, TranscriptResult};
use crate::traits::fetcher::{FetchRequest, PageFetcher};
use crate::traits::transcripts::{TranscriptSnippet, TranscriptSource, TranscriptTrack};
use crate::types::config::ExtractionConfig;

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\s+start="([^"]*)"(?:\s+dur="([^"]*)")?[^>]*>(.*?)</text>"#)
        .expect("valid timed-text pattern")
});

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity pattern"));

/// Transcript source backed by the public YouTube watch page.
pub struct YouTubeTranscripts {
    fetcher: Arc<dyn PageFetcher>,
    config: ExtractionConfig,
}

impl YouTubeTranscripts {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

#[async_trait]
impl TranscriptSource for YouTubeTranscripts {
    async fn list(&self, video_id: &str) -> TranscriptResult<Vec<TranscriptTrack>> {
        let watch_url = format!("https://www.youtube.com/watch?v={}&hl=en", video_id);
        let html = self
            .fetcher
            .fetch_text(&FetchRequest::browser(watch_url, self.config.html_timeout))
            .await?;

        let tracks = parse_caption_tracks(video_id, &html)?;
        debug!(video_id = %video_id, tracks = tracks.len(), "listed caption tracks");
        Ok(tracks)
    }

    async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<TranscriptSnippet>> {
        let mut url = track.base_url.clone();
        if let Some(language) = &track.translated_to {
            url.push_str("&tlang=");
            url.push_str(language);
        }

        let xml = self
            .fetcher
            .fetch_text(&FetchRequest::browser(url, self.config.html_timeout))
            .await?;

        let snippets = parse_timed_text(&xml);
        if snippets.is_empty() && !xml.trim().is_empty() && !xml.contains("<transcript") {
            return Err(TranscriptError::Malformed(
                "response is not timed-text XML".into(),
            ));
        }
        Ok(snippets)
    }
}

/// Pull the caption track list out of a watch page.
pub fn parse_caption_tracks(video_id: &str, html: &str) -> TranscriptResult<Vec<TranscriptTrack>> {
    let Some(array) = json_array_after(html, "\"captionTracks\":") else {
        return Err(TranscriptError::Unavailable {
            video_id: video_id.to_string(),
        });
    };

    let raw: Vec<RawCaptionTrack> =
        serde_json::from_str(array).map_err(|e| TranscriptError::Malformed(e.to_string()))?;

    if raw.is_empty() {
        return Err(TranscriptError::Unavailable {
            video_id: video_id.to_string(),
        });
    }

    Ok(raw
        .into_iter()
        .map(|t| TranscriptTrack {
            video_id: video_id.to_string(),
            language_code: t.language_code,
            is_generated: t.kind.as_deref() == Some("asr"),
            is_translatable: t.is_translatable,
            base_url: t.base_url,
            translated_to: None,
        })
        .collect())
}

/// Slice out the balanced JSON array that follows `key`.
fn json_array_after<'a>(haystack: &'a str, key: &str) -> Option<&'a str> {
    let start = haystack.find(key)? + key.len();
    let rest = &haystack[start..];
    let open = rest.find('[')?;
    if !rest[..open].trim().is_empty() {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in rest[open..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&rest[open..open + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse timed-text XML into snippets.
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSnippet> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .map(|cap| {
            let start = cap[1].parse().unwrap_or(0.0);
            let duration = cap
                .get(2)
                .and_then(|d| d.as_str().parse().ok())
                .unwrap_or(0.0);
            // captions are entity-escaped twice (`&amp;#39;`)
            let text = decode_entities(&decode_entities(&cap[3]));
            let text = INNER_TAG.replace_all(&text, "");
            TranscriptSnippet::new(text.trim(), start, duration)
        })
        .collect()
}

fn decode_entities(s: &str) -> String {
    let named = s
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |cap: &regex::Captures| {
        let code = &cap[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    numeric.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=de","name":{"runs":[{"text":"German [auto]"}]},"languageCode":"de","kind":"asr","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"languageCode":"en","isTranslatable":true}],"audioTracks":[]}}};</script></html>"#;

    #[test]
    fn test_parse_caption_tracks() {
        let tracks = parse_caption_tracks("abc", WATCH_PAGE).unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "de");
        assert!(tracks[0].is_generated);
        assert_eq!(
            tracks[0].base_url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=de"
        );
        assert_eq!(tracks[1].language_code, "en");
        assert!(!tracks[1].is_generated);
    }

    #[test]
    fn test_page_without_captions_is_unavailable() {
        let err = parse_caption_tracks("abc", "<html>no player</html>").unwrap_err();
        assert!(matches!(err, TranscriptError::Unavailable { .. }));
    }

    #[test]
    fn test_parse_timed_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.24" dur="2.1">we&amp;#39;re going</text><text start="2.34" dur="1.5">to the &lt;b&gt;moon&lt;/b&gt;</text></transcript>"#;
        let snippets = parse_timed_text(xml);

        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "we're going");
        assert_eq!(snippets[0].start, 0.24);
        assert_eq!(snippets[0].duration, 2.1);
        assert_eq!(snippets[1].text, "to the moon");
    }

    #[test]
    fn test_json_array_after_respects_strings() {
        let src = r#""captionTracks":[{"a":"]}["},{"b":[1,2]}],"next":1"#;
        assert_eq!(
            json_array_after(src, "\"captionTracks\":"),
            Some(r#"[{"a":"]}["},{"b":[1,2]}]"#)
        );
    }
}
