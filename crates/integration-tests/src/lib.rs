//! Integration tests for `PropertyHub`.
//!
//! Each test starts the full API router on an ephemeral local port, backed by
//! the in-memory property store and a temporary upload directory, and talks
//! to it over real HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p propertyhub-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use reqwest::Client;
use reqwest::multipart::{Form, Part};

use propertyhub_api::db::InMemoryPropertyStore;
use propertyhub_api::routes;
use propertyhub_api::services::UploadSink;
use propertyhub_api::state::AppState;

/// Body limit used by test servers.
pub const TEST_MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// A running API server plus handles to its backing state.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub store: Arc<InMemoryPropertyStore>,
    upload_dir: tempfile::TempDir,
}

impl TestServer {
    /// Start a server on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or listener cannot be created.
    pub async fn start() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let store = Arc::new(InMemoryPropertyStore::new());
        let state = AppState::with_parts(
            store.clone(),
            UploadSink::new(upload_dir.path()),
            TEST_MAX_UPLOAD_BYTES,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let app = routes::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            store,
            upload_dir,
        }
    }

    /// Build an absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Directory uploaded images are written to.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Number of files currently in the upload directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be read.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .expect("Failed to read upload dir")
            .count()
    }
}

/// Build an add-property form with the given text fields and images.
#[must_use]
pub fn listing_form(id: &str, price: &str, owner: &str, images: &[(&str, &[u8])]) -> Form {
    let mut form = Form::new()
        .text("id", id.to_owned())
        .text("description", format!("Listing {id}"))
        .text("price", price.to_owned())
        .text("owner", owner.to_owned());

    for (file_name, bytes) in images {
        form = form.part("images", Part::bytes(bytes.to_vec()).file_name((*file_name).to_owned()));
    }
    form
}
