//! Flat-file page storage
//!
//! Each URL maps to two files in the store's root directory:
//! `<base>.html` with the raw body and `<base>-metadata.json` with the metadata
//! record, where `<base>` comes from [`derive_base_name`](crate::url::derive_base_name).

use crate::page::{Page, PageMetadata};
use crate::storage::traits::{PageStore, StorageError, StorageResult};
use crate::url::{body_file_name, metadata_file_name};
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Mode requested for stored files, before the process umask applies
#[cfg(unix)]
const FILE_MODE: u32 = 0o777;

/// Page store backed by plain files in one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory is not created or checked here; writes into a missing
    /// directory fail like any other write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the body file for a URL
    pub fn body_path(&self, url: &str) -> PathBuf {
        self.root.join(body_file_name(url))
    }

    /// Path of the metadata file for a URL
    pub fn metadata_path(&self, url: &str) -> PathBuf {
        self.root.join(metadata_file_name(url))
    }
}

impl PageStore for FileStore {
    fn save_page(&self, page: &Page) -> StorageResult<()> {
        let url = page.url();

        let body_path = self.body_path(url);
        write_replacing(&body_path, &page.body).map_err(|source| StorageError::WriteBody {
            url: url.to_string(),
            path: body_path.clone(),
            source,
        })?;

        let record = serde_json::to_vec(&page.metadata).map_err(|source| {
            StorageError::SerializeMetadata {
                url: url.to_string(),
                source,
            }
        })?;

        let metadata_path = self.metadata_path(url);
        write_replacing(&metadata_path, &record).map_err(|source| {
            StorageError::WriteMetadata {
                url: url.to_string(),
                path: metadata_path.clone(),
                source,
            }
        })?;

        tracing::debug!(
            "Stored {} ({} bytes) and {}",
            body_path.display(),
            page.body.len(),
            metadata_path.display()
        );

        Ok(())
    }

    fn load_metadata(&self, url: &str) -> StorageResult<Option<PageMetadata>> {
        let path = self.metadata_path(url);

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No metadata at {}", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::OpenMetadata {
                    url: url.to_string(),
                    path,
                    source,
                })
            }
        };

        let mut contents = Vec::new();
        if let Err(source) = file.read_to_end(&mut contents) {
            return Err(StorageError::ReadMetadata {
                url: url.to_string(),
                path,
                source,
            });
        }

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| StorageError::ParseMetadata {
                url: url.to_string(),
                path,
                source,
            })
    }
}

/// Writes `contents` to `path` through a temporary sibling and a rename
///
/// Readers see either the old file or the new one, never a partial write.
fn write_replacing(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    if let Err(e) = write_permissive(&temp_path, contents) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Creates or truncates `path` with a permissive mode and writes `contents`
fn write_permissive(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)
}
