//! Typed errors for the digest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the task manager can
//! tell business failures (recorded on the task) from store failures
//! (returned to the queue).

use thiserror::Error;

/// Errors raised by the HTTP layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or protocol failure
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Request exceeded its deadline
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Body could not be read or decoded
    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Build from a `reqwest` error, separating timeouts from other transport failures.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Errors raised by extraction strategies.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Source content could not be retrieved
    #[error("network error: {0}")]
    Network(#[from] FetchError),

    /// Neither the transcript nor the page metadata carried enough text
    #[error("insufficient YouTube content")]
    InsufficientYouTubeContent,

    /// Document bytes were not a readable PDF
    #[error("could not parse PDF: {0}")]
    Pdf(String),
}

/// Errors raised while listing or downloading transcripts.
///
/// Never surfaced on a task: the YouTube strategy treats any of these as
/// "no transcript" and falls back to page metadata.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The video has no caption tracks (disabled, private, or age-gated)
    #[error("no transcripts available for video {video_id}")]
    Unavailable { video_id: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Caption data did not have the expected shape
    #[error("malformed transcript data: {0}")]
    Malformed(String),
}

/// Errors raised by the content gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content appears empty")]
    ContentEmpty,
}

/// Errors raised by the enrichment oracle.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Transport, timeout, or API failure reported by the model client
    #[error("language model error: {0}")]
    Oracle(String),

    /// The model answered with nothing usable
    #[error("language model returned an empty response")]
    EmptyResponse,
}

/// Any failure that ends a task in the `failed` state.
///
/// The `Display` output is what follows `"Error: "` in the failed record.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
}

/// Errors raised by task stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the task id
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// Backend failure
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Stored value could not be mapped to a task
    #[error("corrupt task record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// Result type alias for HTTP fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for transcript operations.
pub type TranscriptResult<T> = std::result::Result<T, TranscriptError>;

/// Result type alias for extraction strategies.
pub type StrategyResult<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for language-model calls.
pub type OracleResult<T> = std::result::Result<T, EnrichmentError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let err: PipelineError = ExtractionError::Network(FetchError::Status {
            url: "https://example.com/doc.pdf".into(),
            status: 404,
        })
        .into();
        assert_eq!(
            err.to_string(),
            "network error: HTTP 404 for https://example.com/doc.pdf"
        );

        let err: PipelineError = ValidationError::ContentEmpty.into();
        assert_eq!(err.to_string(), "content appears empty");

        let err: PipelineError = ExtractionError::InsufficientYouTubeContent.into();
        assert_eq!(err.to_string(), "insufficient YouTube content");
    }
}
