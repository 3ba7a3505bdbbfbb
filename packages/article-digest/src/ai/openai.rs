//! `ChatModel` over any OpenAI-compatible endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use article_digest::ai::OpenAIChatModel;
//! use openai_client::OpenAIClient;
//!
//! let client = OpenAIClient::new(api_key).with_base_url("https://api.groq.com/openai/v1");
//! let model = OpenAIChatModel::new(client);
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::debug;

use crate::error::{EnrichmentError, OracleResult};
use crate::traits::ai::{ChatModel, Completion};

#[derive(Clone)]
pub struct OpenAIChatModel {
    client: OpenAIClient,
}

impl OpenAIChatModel {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(&self, request: &Completion) -> OracleResult<String> {
        let chat = ChatRequest::new(&request.model)
            .message(Message::system(&request.system))
            .message(Message::user(&request.user))
            .temperature(request.temperature);

        let response = self
            .client
            .chat_completion(chat)
            .await
            .map_err(|e| EnrichmentError::Oracle(e.to_string()))?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion"
            );
        }
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_failure_is_oracle_error() {
        let client = OpenAIClient::new("test-key").with_base_url("http://127.0.0.1:1/v1");
        let model = OpenAIChatModel::new(client);

        let err = model
            .complete(&Completion {
                model: "llama-3.3-70b-versatile".into(),
                system: "sys".into(),
                user: "body".into(),
                temperature: 0.2,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::Oracle(_)));
    }
}
