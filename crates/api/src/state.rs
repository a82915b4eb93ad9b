//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::PropertyStore;
use crate::services::UploadSink;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The property store is held as a
/// trait object so tests can inject an in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn PropertyStore>,
    uploads: UploadSink,
    max_upload_bytes: usize,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration (upload directory and body limit)
    /// * `store` - Property store implementation
    #[must_use]
    pub fn new(config: &ApiConfig, store: Arc<dyn PropertyStore>) -> Self {
        Self::with_parts(store, UploadSink::new(&config.upload_dir), config.max_upload_bytes)
    }

    /// Create application state from already-built parts.
    #[must_use]
    pub fn with_parts(
        store: Arc<dyn PropertyStore>,
        uploads: UploadSink,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                uploads,
                max_upload_bytes,
            }),
        }
    }

    /// Get a reference to the property store.
    #[must_use]
    pub fn store(&self) -> &dyn PropertyStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the upload sink.
    #[must_use]
    pub fn uploads(&self) -> &UploadSink {
        &self.inner.uploads
    }

    /// Maximum accepted request body size for uploads.
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.inner.max_upload_bytes
    }
}
