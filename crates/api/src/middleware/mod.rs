//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (permissive, the API is consumed by a browser dapp)
//! 5. Body limit (raised to the configured upload size)

pub mod request_id;

use tower_http::cors::CorsLayer;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

/// Permissive CORS policy.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
