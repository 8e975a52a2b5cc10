//! Configuration module for Page-Fetch
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file every setting takes its default.
//!
//! # Example
//!
//! ```no_run
//! use page_fetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("page-fetch.toml")).unwrap();
//! println!("Pages will be stored in: {}", config.storage.output_dir.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, StorageConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::MAX_TIMEOUT_MS;
