//! Language-model abstraction used by enrichment.
//!
//! The model is a stateless oracle: one system instruction and one user body
//! in, one completion string out.

use async_trait::async_trait;

use crate::error::OracleResult;

/// A single chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// Chat-completion oracle.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion and return the text of the first choice.
    async fn complete(&self, request: &Completion) -> OracleResult<String>;
}
