//! Reading-list article digestion.
//!
//! Takes a submitted URL (YouTube video, PDF document, or web page), extracts
//! its text with a source-specific strategy, gates it on length, asks a chat
//! model for a summary and two topic labels, and commits the outcome to the
//! task record.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use article_digest::{
//!     Enricher, Extractor, HttpFetcher, MemoryTaskStore, ReadabilityExtractor, TaskManager,
//!     YouTubeTranscripts, ExtractionConfig, EnrichmentConfig,
//! };
//! use article_digest::testing::MockChatModel;
//!
//! let fetcher = Arc::new(HttpFetcher::new());
//! let extractor = Extractor::new(
//!     fetcher.clone(),
//!     Arc::new(YouTubeTranscripts::new(fetcher)),
//!     Arc::new(ReadabilityExtractor::new()),
//!     ExtractionConfig::default(),
//! );
//! let enricher = Enricher::new(Arc::new(MockChatModel::new()), EnrichmentConfig::default());
//! let manager = TaskManager::new(Arc::new(MemoryTaskStore::new()), extractor, enricher);
//!
//! let outcome = manager.process(&task_id, "https://example.com/post").await?;
//! ```
//!
//! # Modules
//!
//! - [`classify`] - URL → strategy selection
//! - [`strategies`] - YouTube, PDF, and web extraction
//! - [`pipeline`] - Content gate, enrichment, lifecycle manager, worker pool
//! - [`traits`] - Seams for fetchers, transcripts, extractors, models, stores
//! - [`stores`] - Task stores (memory, Postgres)
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod classify;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod pipeline;
pub mod stores;
pub mod strategies;
pub mod testing;
pub mod traits;
pub mod transcripts;
pub mod types;

// Re-export core types at crate root
pub use classify::{classify, SourceKind};
pub use error::{
    EnrichmentError, ExtractionError, FetchError, PipelineError, StoreError, TranscriptError,
    ValidationError,
};
pub use extractors::ReadabilityExtractor;
pub use fetchers::HttpFetcher;
pub use pipeline::{Enricher, Poller, PollerConfig, TaskManager, TaskOutcome, TaskRunner};
pub use strategies::Extractor;
pub use stores::MemoryTaskStore;
pub use traits::{
    ai::{ChatModel, Completion},
    content::ContentExtractor,
    fetcher::{FetchProfile, FetchRequest, PageFetcher},
    store::TaskStore,
    transcripts::{TranscriptSnippet, TranscriptSource, TranscriptTrack},
};
pub use transcripts::YouTubeTranscripts;
pub use types::{
    config::{EnrichmentConfig, ExtractionConfig, ValidationConfig},
    content::{EnrichmentResult, ExtractionResult},
    task::{Task, TaskCommit, TaskId, TaskRequest, TaskStatus, PLACEHOLDER_TITLE},
};

#[cfg(feature = "postgres")]
pub use stores::PostgresTaskStore;

#[cfg(feature = "openai")]
pub use ai::OpenAIChatModel;
