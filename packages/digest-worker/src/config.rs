use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Worker configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub concurrency: usize,
    pub poll_interval: Duration,
    pub batch_size: usize,
    pub lease_duration: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            llm_api_key: env::var("LLM_API_KEY")
                .or_else(|_| env::var("GROQ_API_KEY"))
                .context("LLM_API_KEY (or GROQ_API_KEY) must be set")?,
            llm_base_url: env::var("LLM_BASE_URL").unwrap_or_else(|_| GROQ_BASE_URL.to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            llm_timeout: Duration::from_secs(
                parse_var("LLM_TIMEOUT_SECS", 60).context("LLM_TIMEOUT_SECS must be a number")?,
            ),
            concurrency: parse_var("WORKER_CONCURRENCY", 4)
                .context("WORKER_CONCURRENCY must be a number")?,
            poll_interval: Duration::from_secs(
                parse_var("WORKER_POLL_INTERVAL_SECS", 5)
                    .context("WORKER_POLL_INTERVAL_SECS must be a number")?,
            ),
            batch_size: parse_var("WORKER_BATCH_SIZE", 10)
                .context("WORKER_BATCH_SIZE must be a number")?,
            lease_duration: Duration::from_secs(
                parse_var("WORKER_LEASE_SECS", 600).context("WORKER_LEASE_SECS must be a number")?,
            ),
        })
    }

    /// The database URL, required by commands that need persistence.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, T::Err> {
    match env::var(name) {
        Ok(value) => value.trim().parse(),
        Err(_) => Ok(default),
    }
}
