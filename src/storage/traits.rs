//! Storage traits and error types
//!
//! This module defines the trait interface for page storage backends and
//! associated error types.

use crate::page::{Page, PageMetadata};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write page body for {url} to {}: {source}", .path.display())]
    WriteBody {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize metadata for {url}: {source}")]
    SerializeMetadata {
        url: String,
        source: serde_json::Error,
    },

    #[error("failed to write metadata for {url} to {}: {source}", .path.display())]
    WriteMetadata {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open metadata for {url} at {}: {source}", .path.display())]
    OpenMetadata {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read metadata for {url} at {}: {source}", .path.display())]
    ReadMetadata {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata for {url} at {}: {source}", .path.display())]
    ParseMetadata {
        url: String,
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Short description of the failed step, naming the page
    pub fn summary(&self) -> String {
        match self {
            Self::WriteBody { url, .. } => format!("Error storing HTML of Page: {}", url),
            Self::SerializeMetadata { url, .. } => {
                format!("Error rendering the Metadata for Page: {}", url)
            }
            Self::WriteMetadata { url, .. } => {
                format!("Error storing the Metadata for Page: {}", url)
            }
            Self::OpenMetadata { url, .. } => format!("Error opening Metadata for Page: {}", url),
            Self::ReadMetadata { url, .. } => {
                format!("Error reading Metadata storage for Page: {}", url)
            }
            Self::ParseMetadata { url, .. } => {
                format!("Error parsing Metadata storage for Page: {}", url)
            }
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page storage backends
///
/// A stored page is a body plus its metadata record, keyed by URL. Saving the
/// same URL again replaces both; no history is kept.
pub trait PageStore {
    /// Stores a page's body and metadata
    ///
    /// The two halves are written independently. If the second write fails the
    /// first one is not rolled back.
    fn save_page(&self, page: &Page) -> StorageResult<()>;

    /// Loads the metadata stored for a URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PageMetadata))` - Metadata from the most recent save
    /// * `Ok(None)` - Nothing has been stored for this URL
    /// * `Err(StorageError)` - Metadata exists but could not be read
    fn load_metadata(&self, url: &str) -> StorageResult<Option<PageMetadata>>;
}
