//! Page and metadata types
//!
//! A [`Page`] lives only as long as one fetch: it owns the response body while
//! the body is inspected and stored. [`PageMetadata`] is the part that is
//! persisted and read back later.

use crate::crawler::{extract_tag_counts, ExtractError, TagCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout used when printing the fetch time, e.g. `Mon Jan  2 15:04:05 2006 UTC`
pub const LAST_FETCH_FORMAT: &str = "%a %b %e %H:%M:%S %Y %Z";

/// Persisted summary of a single fetch
///
/// The serialized field names are part of the on-disk format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// The URL as supplied by the caller
    #[serde(rename = "site")]
    pub url: String,

    /// Number of `<a>` start tags
    #[serde(rename = "num_links")]
    pub link_count: u64,

    /// Number of `<img>` start tags
    #[serde(rename = "num_images")]
    pub image_count: u64,

    /// When the response arrived (UTC)
    #[serde(rename = "last_fetch")]
    pub last_fetch_time: DateTime<Utc>,
}

impl PageMetadata {
    /// Creates metadata for a freshly fetched URL with zero counts
    pub fn new(url: impl Into<String>, last_fetch_time: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            link_count: 0,
            image_count: 0,
            last_fetch_time,
        }
    }

    /// Overwrites the counts with the result of an extraction
    pub fn apply_counts(&mut self, counts: TagCounts) {
        self.link_count = counts.links;
        self.image_count = counts.images;
    }
}

impl fmt::Display for PageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site: {}\n num_links: {}\n images: {}\n last_fetch: {}",
            self.url,
            self.link_count,
            self.image_count,
            self.last_fetch_time.format(LAST_FETCH_FORMAT)
        )
    }
}

/// A fetched page: its raw body plus the metadata describing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub body: Vec<u8>,
    pub metadata: PageMetadata,
}

impl Page {
    pub fn new(body: Vec<u8>, metadata: PageMetadata) -> Self {
        Self { body, metadata }
    }

    pub fn url(&self) -> &str {
        &self.metadata.url
    }

    /// Counts the links and images in the body and records them in the metadata
    ///
    /// An encoding error still carries counts over the whole body, and those
    /// are recorded so the page is stored with usable metadata.
    pub fn extract_metadata(&mut self) -> Result<(), ExtractError> {
        match extract_tag_counts(&self.body) {
            Ok(counts) => {
                self.metadata.apply_counts(counts);
                Ok(())
            }
            Err(e) => {
                self.metadata.apply_counts(e.counts());
                Err(e)
            }
        }
    }
}
