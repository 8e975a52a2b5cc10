//! Storage module for persisting fetched pages
//!
//! This module handles writing page bodies and metadata records and reading
//! metadata back:
//! - The `PageStore` trait that the coordinator talks to
//! - The flat-file `FileStore` backend
//! - Storage error types

mod files;
mod traits;

pub use files::FileStore;
pub use traits::{PageStore, StorageError, StorageResult};

use crate::config::StorageConfig;

/// Opens the file store described by the configuration
///
/// # Example
///
/// ```
/// use page_fetch::config::StorageConfig;
/// use page_fetch::storage::open_storage;
///
/// let store = open_storage(&StorageConfig::default());
/// assert_eq!(store.root(), std::path::Path::new("."));
/// ```
pub fn open_storage(config: &StorageConfig) -> FileStore {
    FileStore::new(&config.output_dir)
}
