//! Upload sink for property images.
//!
//! Files are written to a single flat directory under a generated key
//! (`<uuid><.ext>`). The client-supplied filename only contributes a sanitized
//! extension; the full original name is kept on [`StoredUpload`] as metadata.
//!
//! Serving resolves a requested filename against the same directory and
//! refuses anything that is not a plain file name inside it.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// Errors produced by the upload sink.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filesystem operation failed.
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested filename is not a plain name inside the upload directory.
    #[error("unsafe filename: {0:?}")]
    UnsafeFilename(String),

    /// No stored file with this name.
    #[error("file not found: {0}")]
    NotFound(String),
}

/// A file written by [`UploadSink::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Generated storage key (the file name on disk).
    pub key: String,
    /// Full path of the stored file.
    pub path: PathBuf,
    /// Filename as supplied by the client, if any.
    pub original_name: Option<String>,
    /// Number of bytes written.
    pub size: usize,
}

impl StoredUpload {
    /// The path as recorded in a property's `images` list.
    #[must_use]
    pub fn stored_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Writes uploaded files to, and resolves them from, a fixed directory.
#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
}

impl UploadSink {
    /// Create a sink rooted at `dir`. The directory is not touched until
    /// [`ensure_dir`](Self::ensure_dir) or [`store`](Self::store) is called.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The upload directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `bytes` under a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be created or written.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        self.ensure_dir().await?;

        let key = storage_key(original_name);
        let path = self.dir.join(&key);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(
            key = %key,
            original_name = original_name.unwrap_or_default(),
            size = bytes.len(),
            "Stored upload"
        );

        Ok(StoredUpload {
            key,
            path,
            original_name: original_name.map(str::to_owned),
            size: bytes.len(),
        })
    }

    /// Delete a previously stored upload. Failures are logged, not returned.
    pub async fn discard(&self, upload: &StoredUpload) {
        if let Err(e) = tokio::fs::remove_file(&upload.path).await {
            tracing::warn!(key = %upload.key, error = %e, "Failed to remove upload");
        }
    }

    /// Map a requested filename to a path inside the upload directory.
    ///
    /// Only a single plain path component is accepted.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsafeFilename` for empty names, separators,
    /// `.`/`..`, or anything that is not one normal path component.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, UploadError> {
        let unsafe_name = || UploadError::UnsafeFilename(filename.to_owned());

        if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
            return Err(unsafe_name());
        }

        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => {
                Ok(self.dir.join(name))
            }
            _ => Err(unsafe_name()),
        }
    }

    /// Resolve `filename` to an existing regular file inside the directory.
    ///
    /// Symlinks pointing outside the upload directory are rejected.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsafeFilename` if the name or its target escapes
    /// the directory, `UploadError::NotFound` if no such file exists, and
    /// `UploadError::Io` for other filesystem failures.
    pub async fn locate(&self, filename: &str) -> Result<PathBuf, UploadError> {
        let path = self.resolve(filename)?;

        let canonical = match tokio::fs::canonicalize(&path).await {
            Ok(p) => p,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(UploadError::NotFound(filename.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let root = tokio::fs::canonicalize(&self.dir).await?;
        if !canonical.starts_with(&root) {
            return Err(UploadError::UnsafeFilename(filename.to_owned()));
        }

        let metadata = tokio::fs::metadata(&canonical).await?;
        if !metadata.is_file() {
            return Err(UploadError::NotFound(filename.to_owned()));
        }

        Ok(canonical)
    }
}

/// Generate a storage key, keeping a short alphanumeric extension from the
/// original name when it has one.
fn storage_key(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();

    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id,
    }
}
