//! URL handling module for Page-Fetch
//!
//! Pages are stored under a name derived from their URL. This module turns a URL
//! into that name without touching the filesystem.

mod filename;

pub use filename::{derive_base_name, strip_scheme, FILLER, INVALID_BASE_NAME};

/// Suffix of the file holding a page's raw body
pub const BODY_SUFFIX: &str = ".html";

/// Suffix of the file holding a page's metadata record
pub const METADATA_SUFFIX: &str = "-metadata.json";

/// Returns the file name of the stored body for a URL
///
/// # Examples
///
/// ```
/// use page_fetch::url::body_file_name;
///
/// assert_eq!(body_file_name("https://example.com/"), "example.com.html");
/// ```
pub fn body_file_name(url: &str) -> String {
    format!("{}{}", derive_base_name(url), BODY_SUFFIX)
}

/// Returns the file name of the stored metadata record for a URL
pub fn metadata_file_name(url: &str) -> String {
    format!("{}{}", derive_base_name(url), METADATA_SUFFIX)
}
