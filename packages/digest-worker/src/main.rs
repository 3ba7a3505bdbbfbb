//! Digest worker
//!
//! Runs submitted reading-list articles through extraction and enrichment.
//!
//! ```text
//! digest-worker submit --url https://example.com/post
//! digest-worker process --task-id <ID> --url https://example.com/post
//! digest-worker run
//! ```

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use article_digest::{
    Enricher, EnrichmentConfig, ExtractionConfig, Extractor, HttpFetcher, MemoryTaskStore,
    OpenAIChatModel, Poller, PollerConfig, PostgresTaskStore, ReadabilityExtractor, Task, TaskId,
    TaskManager, TaskRunner, TaskStore, YouTubeTranscripts,
};
use clap::{Parser, Subcommand};
use openai_client::OpenAIClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Parser)]
#[command(name = "digest-worker")]
#[command(about = "Extract, summarize, and tag reading-list articles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single task and print the final record
    Process {
        #[arg(long)]
        task_id: Option<String>,
        #[arg(long)]
        url: String,
    },

    /// Insert a pending task and print its id
    Submit {
        #[arg(long)]
        url: String,
    },

    /// Poll the store and process pending tasks until interrupted
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,article_digest=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit { url } => submit(url).await,
        Commands::Process { task_id, url } => process(task_id, url).await,
        Commands::Run => run().await,
    }
}

async fn connect(database_url: &str) -> Result<Arc<PostgresTaskStore>> {
    let store = PostgresTaskStore::new(database_url)
        .await
        .context("Failed to connect to task store")?;
    Ok(Arc::new(store))
}

fn build_manager(config: &Config, store: Arc<dyn TaskStore>) -> Result<TaskManager> {
    let fetcher = Arc::new(HttpFetcher::new());
    let extraction = ExtractionConfig::default();
    let extractor = Extractor::new(
        fetcher.clone(),
        Arc::new(YouTubeTranscripts::new(fetcher).with_config(extraction.clone())),
        Arc::new(ReadabilityExtractor::new()),
        extraction,
    );

    let client = OpenAIClient::new(&config.llm_api_key)
        .with_base_url(&config.llm_base_url)
        .with_timeout(config.llm_timeout)
        .context("Failed to build language model client")?;
    let enricher = Enricher::new(
        Arc::new(OpenAIChatModel::new(client)),
        EnrichmentConfig::default().with_model(&config.llm_model),
    );

    Ok(TaskManager::new(store, extractor, enricher))
}

async fn submit(url: String) -> Result<()> {
    let config = Config::from_env()?;
    let store = connect(config.require_database_url()?).await?;

    let task = Task::pending(TaskId::generate(), url);
    store.insert(&task).await.context("Failed to insert task")?;

    tracing::info!(task_id = %task.id, url = %task.url, "Task submitted");
    println!("{}", task.id);
    Ok(())
}

async fn process(task_id: Option<String>, url: String) -> Result<()> {
    let config = Config::from_env()?;

    let store: Arc<dyn TaskStore> = match &config.database_url {
        Some(database_url) => connect(database_url).await?,
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryTaskStore::new())
        }
    };

    let task_id = task_id.map(TaskId::new).unwrap_or_else(TaskId::generate);
    if store.get(&task_id).await?.is_none() {
        store.insert(&Task::pending(task_id.clone(), &url)).await?;
    }

    let manager = build_manager(&config, store.clone())?;
    manager
        .process(&task_id, &url)
        .await
        .context("Failed to record task outcome")?;

    let task = store
        .get(&task_id)
        .await?
        .context("Task disappeared from store")?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let store = connect(config.require_database_url()?).await?;

    let manager = Arc::new(build_manager(&config, store.clone())?);
    let shutdown = CancellationToken::new();
    let (tx, rx) = mpsc::channel(config.batch_size.max(1) * 2);

    let poller = Poller::new(
        store,
        PollerConfig {
            batch_size: config.batch_size,
            poll_interval: config.poll_interval,
            lease_duration: config.lease_duration,
        },
    );
    let poller_handle = tokio::spawn(poller.run(tx, shutdown.clone()));

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested, finishing in-flight tasks");
            signal.cancel();
        }
    });

    tracing::info!(
        model = %config.llm_model,
        concurrency = config.concurrency,
        "Digest worker started"
    );
    let committed = TaskRunner::new(manager, config.concurrency).run(rx).await;

    poller_handle.await.context("Poller task panicked")?;
    tracing::info!(committed, "Digest worker stopped");
    Ok(())
}
