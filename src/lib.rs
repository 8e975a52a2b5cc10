//! Page-Fetch: fetch web pages and keep a record of what they contained
//!
//! This crate fetches pages over HTTP, counts the links and images in their HTML,
//! stores the raw body next to a small JSON metadata record, and reads that record
//! back on request.

pub mod config;
pub mod crawler;
pub mod output;
pub mod page;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid request for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("HTML extraction error: {0}")]
    Extract(#[from] crawler::ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

impl FetchError {
    /// Short human-readable description of the stage that failed
    ///
    /// This is the text reported to the user ahead of the error details.
    pub fn summary(&self) -> String {
        match self {
            Self::Config(_) => "Error loading configuration".to_string(),
            Self::Client(_) => "Error building the HTTP client".to_string(),
            Self::Request { .. } => "Error occurred during Fetch Request generation".to_string(),
            Self::Network { .. } => "Error occurred while Fetching the Page".to_string(),
            Self::Body { .. } => "Error occurred while Parsing the Page".to_string(),
            Self::Extract(_) => "Error when extracting metadata".to_string(),
            Self::Storage(e) => e.summary(),
        }
    }

    /// Returns true if the underlying HTTP error was a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network { source, .. } | Self::Body { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Page-Fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_batch, Action, Coordinator};
pub use output::OutputMsg;
pub use page::{Page, PageMetadata};
pub use storage::{FileStore, PageStore};
pub use url::derive_base_name;
