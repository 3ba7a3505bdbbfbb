//! Values passed between strategies, the content gate, and enrichment.

use serde::{Deserialize, Serialize};

/// Title and raw body produced by an extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub text: String,
}

impl ExtractionResult {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Length of the body in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Output of the two enrichment calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    /// Model output, used verbatim
    pub summary: String,

    /// Parsed topic labels (normally two)
    pub topics: Vec<String>,
}
