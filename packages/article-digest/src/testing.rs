//! Test doubles for every collaborator of the task manager.
//!
//! These let applications exercise the full lifecycle without network or
//! language-model calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{
    EnrichmentError, FetchError, FetchResult, OracleResult, TranscriptError, TranscriptResult,
};
use crate::pipeline::prompts::TOPIC_PROMPT;
use crate::traits::ai::{ChatModel, Completion};
use crate::traits::content::ContentExtractor;
use crate::traits::fetcher::{FetchProfile, FetchRequest, PageFetcher};
use crate::traits::transcripts::{TranscriptSnippet, TranscriptSource, TranscriptTrack};

/// Canned response for a URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Bytes(Vec<u8>),
    Status(u16),
}

/// A mock fetcher with canned responses per URL (and optionally per profile).
///
/// Unknown URLs fail with `FetchError::Request`.
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<(String, Option<FetchProfile>), MockResponse>>>,

    /// Call tracking for assertions
    requests: Arc<RwLock<Vec<FetchRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn respond(self, url: impl Into<String>, profile: Option<FetchProfile>, response: MockResponse) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert((url.into(), profile), response);
        self
    }

    /// Serve `html` for the URL under any profile.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.respond(url, None, MockResponse::Text(html.into()))
    }

    /// Serve raw bytes for the URL under any profile.
    pub fn with_bytes(self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.respond(url, None, MockResponse::Bytes(bytes))
    }

    /// Answer the URL with a non-2xx status under any profile.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.respond(url, None, MockResponse::Status(status))
    }

    /// Serve `html` only for requests made with `profile`.
    pub fn with_profile_page(
        self,
        url: impl Into<String>,
        profile: FetchProfile,
        html: impl Into<String>,
    ) -> Self {
        self.respond(url, Some(profile), MockResponse::Text(html.into()))
    }

    /// Answer with `status` only for requests made with `profile`.
    pub fn with_profile_status(
        self,
        url: impl Into<String>,
        profile: FetchProfile,
        status: u16,
    ) -> Self {
        self.respond(url, Some(profile), MockResponse::Status(status))
    }

    /// All requests made to this mock.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.read().unwrap().clone()
    }

    fn lookup(&self, request: &FetchRequest) -> FetchResult<Vec<u8>> {
        self.requests.write().unwrap().push(request.clone());

        let responses = self.responses.read().unwrap();
        let response = responses
            .get(&(request.url.clone(), Some(request.profile)))
            .or_else(|| responses.get(&(request.url.clone(), None)))
            .ok_or_else(|| FetchError::Request {
                url: request.url.clone(),
                message: "no mock response".into(),
            })?;

        match response {
            MockResponse::Text(text) => Ok(text.clone().into_bytes()),
            MockResponse::Bytes(bytes) => Ok(bytes.clone()),
            MockResponse::Status(status) => Err(FetchError::Status {
                url: request.url.clone(),
                status: *status,
            }),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_text(&self, request: &FetchRequest) -> FetchResult<String> {
        let bytes = self.lookup(request)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_bytes(&self, request: &FetchRequest) -> FetchResult<Vec<u8>> {
        self.lookup(request)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock transcript source.
///
/// Videos without registered tracks are `Unavailable`; tracks without
/// registered snippets fail to fetch.
#[derive(Default)]
pub struct MockTranscripts {
    tracks: Arc<RwLock<HashMap<String, Vec<TranscriptTrack>>>>,
    snippets: Arc<RwLock<HashMap<(String, Option<String>), Vec<TranscriptSnippet>>>>,
}

impl MockTranscripts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the track list for a video.
    pub fn with_tracks(self, video_id: impl Into<String>, tracks: Vec<TranscriptTrack>) -> Self {
        self.tracks.write().unwrap().insert(video_id.into(), tracks);
        self
    }

    /// Register the snippets served for a track (or a translated view of one).
    pub fn with_snippets(self, track: &TranscriptTrack, snippets: Vec<TranscriptSnippet>) -> Self {
        self.snippets
            .write()
            .unwrap()
            .insert(Self::key(track), snippets);
        self
    }

    /// Register a single-snippet English transcript for a video.
    pub fn with_english_transcript(self, video_id: &str, text: impl Into<String>) -> Self {
        let track = TranscriptTrack {
            video_id: video_id.to_string(),
            language_code: "en".into(),
            is_generated: false,
            is_translatable: true,
            base_url: format!("https://mock.transcripts/{video_id}/en"),
            translated_to: None,
        };
        self.with_tracks(video_id, vec![track.clone()])
            .with_snippets(&track, vec![TranscriptSnippet::new(text, 0.0, 1.0)])
    }

    fn key(track: &TranscriptTrack) -> (String, Option<String>) {
        (track.base_url.clone(), track.translated_to.clone())
    }
}

#[async_trait]
impl TranscriptSource for MockTranscripts {
    async fn list(&self, video_id: &str) -> TranscriptResult<Vec<TranscriptTrack>> {
        self.tracks
            .read()
            .unwrap()
            .get(video_id)
            .cloned()
            .ok_or_else(|| TranscriptError::Unavailable {
                video_id: video_id.to_string(),
            })
    }

    async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<TranscriptSnippet>> {
        self.snippets
            .read()
            .unwrap()
            .get(&Self::key(track))
            .cloned()
            .ok_or_else(|| TranscriptError::Malformed(format!("no mock snippets for {}", track.base_url)))
    }
}

/// Default summary returned by [`MockChatModel`].
pub const MOCK_SUMMARY: &str = "1. 🎯 **TL;DR**: A mock summary.\n\
2. 🔑 **Key Points**:\n• First point\n• Second point\n\
3. 💡 **Conclusion**: Mock conclusion.";

/// Default topic line returned by [`MockChatModel`].
pub const MOCK_TOPICS: &str = "Tech, AI";

/// A mock chat model. Topic requests are recognized by their system prompt.
pub struct MockChatModel {
    summary: RwLock<Result<String, String>>,
    topics: RwLock<Result<String, String>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<Completion>>>,
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self {
            summary: RwLock::new(Ok(MOCK_SUMMARY.to_string())),
            topics: RwLock::new(Ok(MOCK_TOPICS.to_string())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        *self.summary.write().unwrap() = Ok(summary.into());
        self
    }

    pub fn with_topics(self, topics: impl Into<String>) -> Self {
        *self.topics.write().unwrap() = Ok(topics.into());
        self
    }

    /// Make summary calls fail with `EnrichmentError::Oracle(message)`.
    pub fn failing_summary(self, message: impl Into<String>) -> Self {
        *self.summary.write().unwrap() = Err(message.into());
        self
    }

    /// Make topic calls fail with `EnrichmentError::Oracle(message)`.
    pub fn failing_topics(self, message: impl Into<String>) -> Self {
        *self.topics.write().unwrap() = Err(message.into());
        self
    }

    /// All completions requested from this mock.
    pub fn calls(&self) -> Vec<Completion> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: &Completion) -> OracleResult<String> {
        self.calls.write().unwrap().push(request.clone());

        let response = if request.system == TOPIC_PROMPT {
            self.topics.read().unwrap().clone()
        } else {
            self.summary.read().unwrap().clone()
        };
        response.map_err(EnrichmentError::Oracle)
    }
}

/// A content extractor that always returns the same result.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    output: Option<String>,
}

impl StaticExtractor {
    pub fn new(output: Option<String>) -> Self {
        Self { output }
    }
}

impl ContentExtractor for StaticExtractor {
    fn extract(&self, _html: &str, _url: &str) -> Option<String> {
        self.output.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}
