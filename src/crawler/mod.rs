//! Crawler module for page fetching and processing
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching with bounded timeouts
//! - HTML tokenizing and tag counting
//! - Batch coordination and result reporting

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Coordinator;
pub use fetcher::{
    build_http_client, fetch_page, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use parser::{extract_tag_counts, ExtractError, TagCounts};

use crate::storage::PageStore;
use tokio::task::JoinHandle;

/// What a batch does with its URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetch each page and store it
    Fetch,
    /// Print previously stored metadata
    LoadMetadata,
}

impl Action {
    /// Progress line announced before the batch starts
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fetch => "Fetching new page(s)...",
            Self::LoadMetadata => "Loading cached metadata...",
        }
    }
}

/// Runs a batch on a background task
///
/// The task processes the URLs in order and closes the message channel when it
/// is done, so the caller can simply drain the receiver until it ends.
///
/// # Example
///
/// ```no_run
/// use page_fetch::config::Config;
/// use page_fetch::crawler::{run_batch, Action, Coordinator};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (coordinator, mut messages) = Coordinator::from_config(&Config::default())?;
/// let batch = run_batch(coordinator, Action::Fetch, vec!["https://example.com".to_string()]);
///
/// while let Some(msg) = messages.recv().await {
///     println!("{}", msg);
/// }
/// batch.await?;
/// # Ok(())
/// # }
/// ```
pub fn run_batch<S>(coordinator: Coordinator<S>, action: Action, urls: Vec<String>) -> JoinHandle<()>
where
    S: PageStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        tracing::info!("Starting {:?} batch of {} URL(s)", action, urls.len());

        match action {
            Action::Fetch => coordinator.fetch_all(&urls).await,
            Action::LoadMetadata => coordinator.load_all_metadata(&urls).await,
        }

        coordinator.shutdown();
    })
}
