//! Summary and topic enrichment through the chat model.

use std::sync::Arc;

use tracing::{debug, warn};

use super::prompts::{SUMMARY_PROMPT, TOPIC_PROMPT};
use crate::error::{EnrichmentError, OracleResult};
use crate::traits::ai::{ChatModel, Completion};
use crate::types::config::EnrichmentConfig;
use crate::types::content::EnrichmentResult;

/// Number of topic labels the model is asked for.
pub const EXPECTED_TOPICS: usize = 2;

pub struct Enricher {
    model: Arc<dyn ChatModel>,
    config: EnrichmentConfig,
}

impl Enricher {
    pub fn new(model: Arc<dyn ChatModel>, config: EnrichmentConfig) -> Self {
        Self { model, config }
    }

    /// Summary then topics. Either call failing fails the whole enrichment.
    pub async fn enrich(&self, text: &str) -> OracleResult<EnrichmentResult> {
        let summary = self.summarize(text).await?;
        let topics = self.classify_topics(text).await?;
        Ok(EnrichmentResult { summary, topics })
    }

    /// Model output used verbatim as the summary.
    pub async fn summarize(&self, text: &str) -> OracleResult<String> {
        let summary = self
            .complete(SUMMARY_PROMPT, text, self.config.summary_temperature)
            .await?;
        debug!(chars = summary.chars().count(), "Summary generated");
        Ok(summary)
    }

    /// Topic labels, passed through whatever their count.
    pub async fn classify_topics(&self, text: &str) -> OracleResult<Vec<String>> {
        let raw = self
            .complete(TOPIC_PROMPT, text, self.config.topic_temperature)
            .await?;
        let topics = parse_topics(&raw);
        if topics.len() != EXPECTED_TOPICS {
            warn!(raw = %raw, count = topics.len(), "Unexpected topic count");
        }
        Ok(topics)
    }

    async fn complete(&self, system: &str, user: &str, temperature: f32) -> OracleResult<String> {
        let request = Completion {
            model: self.config.model.clone(),
            system: system.to_string(),
            user: user.to_string(),
            temperature,
        };
        let output = self.model.complete(&request).await?;
        if output.trim().is_empty() {
            return Err(EnrichmentError::EmptyResponse);
        }
        Ok(output)
    }
}

/// Split on commas, trim whitespace and periods, drop empty fragments.
pub fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|fragment| fragment.trim().replace('.', "").trim().to_string())
        .filter(|topic| !topic.is_empty())
        .collect()
}
