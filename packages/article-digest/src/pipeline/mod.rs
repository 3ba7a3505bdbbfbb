//! The task pipeline: content gate, enrichment, lifecycle manager, and the
//! worker pool that drives it.

pub mod enrich;
pub mod manager;
pub mod prompts;
pub mod runner;
pub mod validate;

pub use enrich::{parse_topics, Enricher, EXPECTED_TOPICS};
pub use manager::{TaskManager, TaskOutcome};
pub use prompts::{SUMMARY_PROMPT, TOPIC_PROMPT};
pub use runner::{Poller, PollerConfig, TaskRunner};
pub use validate::validate_content;
