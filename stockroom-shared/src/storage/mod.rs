/// Public file store for uploaded images
///
/// Uploaded files live under a single public root directory, organized by
/// prefix (`categories/`, `products/`). Database rows reference files by
/// their path relative to that root; the API server serves the root at
/// `/storage` and rewrites relative paths to absolute URLs in list
/// responses.
///
/// File writes and row writes are not atomic. A crash between the two can
/// leave an orphaned file or a dangling reference; the system tolerates
/// both.
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::storage::FileStore;
///
/// # async fn example() -> Result<(), stockroom_shared::storage::StorageError> {
/// let store = FileStore::new("/var/lib/stockroom/public");
///
/// let path = store.store("categories", "png", &[0x89, 0x50, 0x4e, 0x47]).await?;
/// assert!(path.starts_with("categories/"));
///
/// store.delete(&path).await?;
/// # Ok(())
/// # }
/// ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// File store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The relative path escapes the store root or is otherwise malformed
    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    /// Underlying filesystem failure (disk full, permissions, ...)
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Disk-backed public file store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at the given public directory
    ///
    /// The directory itself is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The public root directory backing this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores a file under `{prefix}/{uuid}.{extension}` and returns the
    /// relative path
    ///
    /// The prefix subdirectory is created if missing. Generated names never
    /// collide with user input, so the original file name is discarded.
    pub async fn store(
        &self,
        prefix: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let relative = format!("{}/{}.{}", prefix, Uuid::new_v4(), extension);
        let full = self.resolve(&relative)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full, bytes).await?;

        debug!(path = %relative, size = bytes.len(), "Stored file");
        Ok(relative)
    }

    /// Deletes a file by its relative path
    ///
    /// A file that is already gone is not an error, matching the fact that
    /// row deletion and file deletion are not atomic.
    pub async fn delete(&self, relative: &str) -> Result<(), StorageError> {
        let full = self.resolve(relative)?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                debug!(path = %relative, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Deletes a file only if it is present, logging when it is not
    ///
    /// Used by category updates, which check for the old image before
    /// replacing it.
    pub async fn delete_if_exists(&self, relative: &str) -> Result<(), StorageError> {
        if self.exists(relative).await? {
            self.delete(relative).await
        } else {
            warn!(path = %relative, "Old file does not exist, skipping delete");
            Ok(())
        }
    }

    /// Checks whether a relative path currently exists in the store
    pub async fn exists(&self, relative: &str) -> Result<bool, StorageError> {
        let full = self.resolve(relative)?;
        Ok(tokio::fs::try_exists(&full).await?)
    }

    /// Builds the public URL for a stored relative path
    ///
    /// URLs take the form `<public-base>/storage/<relative>`.
    pub fn url_for(&self, public_base: &str, relative: &str) -> String {
        format!(
            "{}/storage/{}",
            public_base.trim_end_matches('/'),
            relative
        )
    }

    /// Resolves a relative path against the root, rejecting traversal
    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        if relative.is_empty()
            || relative.starts_with('/')
            || relative.split('/').any(|segment| segment == "..")
        {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }

        Ok(self.root.join(relative))
    }
}
