//! Image serving route.

use axum::{
    body::Body,
    extract::{Path, Request, State},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::Result;
use crate::state::AppState;

/// Serve a stored image by filename.
///
/// The name must be a plain file name inside the upload directory. The
/// `Content-Type` is derived from the extension.
///
/// # Errors
///
/// Returns 400 for names that escape the upload directory, 404 for missing
/// files, and 500 on other I/O failures.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response> {
    let path = state.uploads().locate(&filename).await?;

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    Ok(response.map(Body::new))
}
