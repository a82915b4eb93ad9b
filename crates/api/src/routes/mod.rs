//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                               - Liveness check
//! GET    /health/ready                         - Readiness check (store ping)
//!
//! # Images
//! GET    /image/{filename}                     - Serve a stored image
//!
//! # Properties
//! POST   /add-property                         - Create (multipart, up to 5 `images`)
//! GET    /properties                           - List properties for sale
//! GET    /properties/{owner}                   - List properties of an owner
//! PUT    /properties/{id}                      - Transfer: set owner + price, delist
//! GET    /properties/owner/{id}                - Property summary by id
//! PUT    /properties/update-price/{id}/{price} - Set price, relist
//! DELETE /properties/supprimer/{id}            - Delete
//! ```

pub mod health;
pub mod images;
pub mod properties;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create the property routes router.
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/add-property", post(properties::create))
        .route("/properties", get(properties::list_for_sale))
        // GET reads the segment as an owner, PUT as a property id
        .route(
            "/properties/{key}",
            get(properties::list_by_owner).put(properties::transfer),
        )
        .route("/properties/owner/{id}", get(properties::get_summary))
        .route(
            "/properties/update-price/{id}/{price}",
            put(properties::update_price),
        )
        .route("/properties/supprimer/{id}", delete(properties::delete))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/image/{filename}", get(images::serve))
        .merge(property_routes())
}

/// Build the full application with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes();

    routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)] // latency fits in u64 millis
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
