//! Business services used by route handlers.
//!
//! - `uploads` - Upload sink for property images (store and serve files)

pub mod uploads;

pub use uploads::{StoredUpload, UploadError, UploadSink};
