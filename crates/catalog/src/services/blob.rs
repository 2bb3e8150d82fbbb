//! Object-storage uploads.
//!
//! The seed routine uploads avatar and product images and only keeps the
//! opaque identifier the store hands back; display URLs are derived later
//! from that identifier. [`HttpBlobStore`] talks to the real object storage,
//! [`MemoryBlobStore`] records uploads in memory for tests and local runs.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::StorageConfig;

/// Errors that can occur when uploading a blob.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Upload request failed or the store answered with an error status.
    #[error("upload failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A store that accepts local files and hands back opaque identifiers.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Upload the file at `local_path` into `container`, returning the
    /// storage-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError`] if the file cannot be read or the store rejects
    /// the upload.
    async fn upload(&self, local_path: &Path, container: &str) -> Result<Uuid, BlobError>;
}

/// HTTP-backed object storage client.
///
/// Uploads with `PUT {base_url}/{container}/{id}` and an optional bearer
/// access key.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    access_key: Option<SecretString>,
}

impl HttpBlobStore {
    /// Create a client from storage configuration.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            access_key: config.access_key.clone(),
        }
    }
}

impl BlobStore for HttpBlobStore {
    async fn upload(&self, local_path: &Path, container: &str) -> Result<Uuid, BlobError> {
        let bytes = tokio::fs::read(local_path).await.map_err(|source| BlobError::Io {
            path: local_path.to_path_buf(),
            source,
        })?;

        let id = Uuid::new_v4();
        let url = format!("{}/{container}/{id}", self.base_url);

        let mut request = self.client.put(&url).body(bytes);
        if let Some(key) = &self.access_key {
            request = request.bearer_auth(key.expose_secret());
        }

        request.send().await?.error_for_status()?;

        debug!(%id, container, path = %local_path.display(), "uploaded blob");
        Ok(id)
    }
}

/// A recorded upload, for assertions in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Local path that was uploaded.
    pub path: PathBuf,
    /// Target container.
    pub container: String,
    /// Identifier handed back.
    pub id: Uuid,
}

/// In-memory blob store for tests and local development.
///
/// Never touches the filesystem or the network; every upload succeeds and is
/// recorded.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    uploads: Mutex<Vec<UploadRecord>>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything uploaded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn uploads(&self) -> Vec<UploadRecord> {
        #[allow(clippy::unwrap_used)]
        self.uploads.lock().unwrap().clone()
    }
}

impl BlobStore for MemoryBlobStore {
    async fn upload(&self, local_path: &Path, container: &str) -> Result<Uuid, BlobError> {
        let id = Uuid::new_v4();
        #[allow(clippy::unwrap_used)]
        self.uploads.lock().unwrap().push(UploadRecord {
            path: local_path.to_path_buf(),
            container: container.to_owned(),
            id,
        });
        Ok(id)
    }
}
