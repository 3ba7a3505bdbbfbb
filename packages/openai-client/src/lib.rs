//! Minimal client for OpenAI-compatible chat completion APIs
//!
//! Talks to any endpoint that implements `POST {base_url}/chat/completions`
//! (OpenAI, Groq, local gateways). No domain-specific logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::new(api_key)
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("llama-3.3-70b-versatile")
//!             .message(Message::system("Be brief."))
//!             .message(Message::user("Hello!"))
//!             .temperature(0.2),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completion client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (Groq, Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAIError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Returns the text of the first choice. A response without any choice,
    /// or whose first choice has no content, is an [`OpenAIError::Api`].
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat completion request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "chat completion API error");
            return Err(OpenAIError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let usage = chat_response.usage.clone();
        let content = chat_response
            .into_first_content()
            .ok_or_else(|| OpenAIError::Api("no content in completion".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "chat completion"
        );

        Ok(ChatResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("gsk-test").with_base_url("https://api.groq.com/openai/v1/");

        assert_eq!(client.api_key(), "gsk-test");
        assert_eq!(client.base_url(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_default_base_url() {
        let client = OpenAIClient::new("sk-test");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_timeout_builds_client() {
        let client = tokio_test::assert_ok!(
            OpenAIClient::new("sk-test").with_timeout(Duration::from_secs(5))
        );
        assert_eq!(client.api_key(), "sk-test");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = OpenAIClient::new("sk-test")
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2))
            .unwrap();

        let err = client
            .chat_completion(ChatRequest::new("m").message(Message::user("hi")))
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
