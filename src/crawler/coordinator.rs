//! Fetch coordinator - batch orchestration logic
//!
//! This module contains the loops that drive a batch of URLs through the
//! pipeline, one URL at a time:
//! - Fetch → extract → store for new fetches
//! - Load-only for metadata requests
//! - Reporting every outcome through the message channel

use crate::config::{Config, FetcherConfig};
use crate::crawler::{build_http_client, fetch_page};
use crate::output::{outbox, OutputMsg, Outbox};
use crate::page::Page;
use crate::storage::{open_storage, FileStore, PageStore};
use crate::FetchError;
use reqwest::Client;
use tokio::sync::mpsc;

/// Main coordinator structure
///
/// Owns the shared HTTP client, the page store and the sending half of the
/// message channel. A failure on one URL is reported and never stops the batch.
pub struct Coordinator<S = FileStore> {
    client: Client,
    store: S,
    outbox: Outbox,
}

impl Coordinator<FileStore> {
    /// Creates a coordinator backed by the file store named in the configuration
    pub fn from_config(config: &Config) -> Result<(Self, mpsc::Receiver<OutputMsg>), FetchError> {
        Self::new(&config.fetcher, open_storage(&config.storage))
    }
}

impl<S: PageStore> Coordinator<S> {
    /// Creates a new coordinator and the receiver for its messages
    ///
    /// # Arguments
    ///
    /// * `config` - Timeouts for the HTTP client
    /// * `store` - Where pages are saved and metadata is loaded from
    ///
    /// # Returns
    ///
    /// * `Ok((Coordinator, Receiver))` - The coordinator and its message stream
    /// * `Err(FetchError)` - The HTTP client could not be built
    pub fn new(
        config: &FetcherConfig,
        store: S,
    ) -> Result<(Self, mpsc::Receiver<OutputMsg>), FetchError> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, store))
    }

    /// Creates a coordinator around an already-built HTTP client
    pub fn with_client(client: Client, store: S) -> (Self, mpsc::Receiver<OutputMsg>) {
        let (outbox, messages) = outbox();
        let coordinator = Self {
            client,
            store,
            outbox,
        };
        (coordinator, messages)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a page and describes the outcome
    ///
    /// Success is a silent message; a failed write carries the storage error.
    pub fn save_page(&self, page: &Page) -> OutputMsg {
        match self.store.save_page(page) {
            Ok(()) => OutputMsg::success(),
            Err(e) => OutputMsg::failure(e),
        }
    }

    /// Loads the metadata stored for a URL and describes it
    ///
    /// A URL that was never stored yields an informational message, not an error.
    pub fn load_page_metadata(&self, url: &str) -> OutputMsg {
        match self.store.load_metadata(url) {
            Ok(Some(metadata)) => OutputMsg::info(metadata.to_string()),
            Ok(None) => OutputMsg::info(format!("Metadata does not exist for Page: {}", url)),
            Err(e) => OutputMsg::failure(e),
        }
    }

    /// Fetches each URL and stores its body and metadata
    ///
    /// # Per-URL Flow
    ///
    /// 1. Fetch the page; on failure report it and move on (nothing is stored)
    /// 2. Count links and images; on failure report it but keep going
    /// 3. Save the page and report the outcome
    ///
    /// Each URL ends with exactly one terminal message: the fetch failure or
    /// the save outcome.
    pub async fn fetch_all(&self, urls: &[String]) {
        for url in urls {
            tracing::debug!("Processing URL: {}", url);

            let mut page = match fetch_page(&self.client, url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!("Fetch failed for {}: {}", url, e);
                    self.outbox.send(OutputMsg::failure(e)).await;
                    continue;
                }
            };

            if let Err(e) = page.extract_metadata() {
                tracing::warn!("Failed to extract metadata for {}: {}", url, e);
                self.outbox.send(OutputMsg::failure(e)).await;
            }

            tracing::debug!(
                "{}: {} links, {} images",
                url,
                page.metadata.link_count,
                page.metadata.image_count
            );

            let msg = self.save_page(&page);
            self.outbox.send(msg).await;
        }
    }

    /// Loads and reports the stored metadata for each URL
    pub async fn load_all_metadata(&self, urls: &[String]) {
        for url in urls {
            tracing::debug!("Loading metadata for: {}", url);
            let msg = self.load_page_metadata(url);
            self.outbox.send(msg).await;
        }
    }

    /// Closes the message channel; safe to call more than once
    pub fn shutdown(&self) {
        self.outbox.close();
    }
}
