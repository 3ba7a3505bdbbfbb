//! Transcript source implementations.
//!
//! - `YouTubeTranscripts` - caption tracks from the YouTube watch page
//! - `MockTranscripts` (in [`crate::testing`]) - canned tracks for tests

mod youtube;

pub use youtube::{parse_caption_tracks, parse_timed_text, YouTubeTranscripts};

// Re-export from traits for convenience
pub use crate::traits::transcripts::{TranscriptSnippet, TranscriptSource, TranscriptTrack};
