//! Property listing route handlers.
//!
//! Every id-keyed handler parses the raw path segment into a [`PropertyId`]
//! before calling the store, so malformed ids are answered with 400 without
//! any database access.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use propertyhub_core::{MAX_IMAGES_PER_PROPERTY, NewProperty, Property, PropertyId, PropertySummary};

use crate::error::{AppError, Result};
use crate::services::StoredUpload;
use crate::state::AppState;

const PROPERTY_ADDED: &str = "Property added successfully";
const PRICE_UPDATED: &str = "Property price updated successfully";
const PROPERTY_DELETED: &str = "Property deleted successfully";

/// Response for a created property: the record plus a confirmation message.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub property: Property,
}

/// Response for the update-price route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdatedResponse {
    pub message: &'static str,
    pub updated_property: Property,
}

/// Response for the delete route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub message: &'static str,
    pub deleted_property: Property,
}

/// Request body for an ownership transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub owner: String,
    pub price: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_id(raw: &str) -> Result<PropertyId> {
    PropertyId::parse(raw).map_err(|e| {
        tracing::debug!(id = raw, error = %e, "Rejected property id");
        AppError::BadRequest("Invalid property ID".to_string())
    })
}

fn property_not_found() -> AppError {
    AppError::NotFound("Property not found".to_string())
}

fn bad_multipart(err: &MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
}

/// An image part read from the multipart body, not yet written to disk.
struct PendingImage {
    file_name: Option<String>,
    bytes: Bytes,
}

/// Fields of the add-property form.
#[derive(Default)]
struct ListingForm {
    id_property: String,
    description: String,
    price: String,
    owner: String,
    images: Vec<PendingImage>,
}

async fn read_listing_form(multipart: &mut Multipart) -> Result<ListingForm> {
    let mut form = ListingForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| bad_multipart(&e))? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "id" => form.id_property = field.text().await.map_err(|e| bad_multipart(&e))?,
            "description" => form.description = field.text().await.map_err(|e| bad_multipart(&e))?,
            "price" => form.price = field.text().await.map_err(|e| bad_multipart(&e))?,
            "owner" => form.owner = field.text().await.map_err(|e| bad_multipart(&e))?,
            "images" => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|e| bad_multipart(&e))?;

                // Browsers send an empty, unnamed part when no file was picked
                if bytes.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
                    continue;
                }
                if form.images.len() == MAX_IMAGES_PER_PROPERTY {
                    return Err(AppError::BadRequest(format!(
                        "At most {MAX_IMAGES_PER_PROPERTY} images are accepted"
                    )));
                }
                form.images.push(PendingImage { file_name, bytes });
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

async fn discard_uploads(state: &AppState, uploads: &[StoredUpload]) {
    for upload in uploads {
        state.uploads().discard(upload).await;
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a property from a multipart form with up to five images.
///
/// Images are written first; if any write or the insert fails, files already
/// written for this request are removed.
///
/// # Errors
///
/// Returns 400 for a malformed form or too many images, 500 on storage failure.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let form = read_listing_form(&mut multipart).await?;

    let mut stored = Vec::with_capacity(form.images.len());
    for image in &form.images {
        match state
            .uploads()
            .store(image.file_name.as_deref(), &image.bytes)
            .await
        {
            Ok(upload) => stored.push(upload),
            Err(e) => {
                discard_uploads(&state, &stored).await;
                return Err(e.into());
            }
        }
    }

    let images = stored.iter().map(StoredUpload::stored_path).collect();
    let input = match NewProperty::new(
        form.id_property,
        form.description,
        form.price,
        form.owner,
        images,
    ) {
        Ok(input) => input,
        Err(e) => {
            discard_uploads(&state, &stored).await;
            return Err(AppError::BadRequest(e.to_string()));
        }
    };

    let property = match state.store().create(input).await {
        Ok(property) => property,
        Err(e) => {
            discard_uploads(&state, &stored).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        property_id = %property.id,
        id_property = %property.id_property,
        owner = %property.owner,
        price = %property.price,
        images = property.images.len(),
        original_names = ?stored.iter().map(|u| u.original_name.as_deref()).collect::<Vec<_>>(),
        "Property added"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: PROPERTY_ADDED,
            property,
        }),
    ))
}

/// List every property currently for sale.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_for_sale(State(state): State<AppState>) -> Result<Json<Vec<Property>>> {
    Ok(Json(state.store().list_for_sale().await?))
}

/// List the properties owned by `owner` (exact match).
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Vec<Property>>> {
    Ok(Json(state.store().list_by_owner(&owner).await?))
}

/// Fetch the public summary of one property.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 if absent, 500 if the store fails.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertySummary>> {
    let id = parse_id(&id)?;
    tracing::debug!(property_id = %id, "Fetching property");

    let property = state.store().get(id).await?.ok_or_else(property_not_found)?;
    Ok(Json(property.into()))
}

/// Set a new price and put the property back on the market.
///
/// Both the id and the price come from the path; there is no body.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 if absent, 500 if the store fails.
pub async fn update_price(
    State(state): State<AppState>,
    Path((id, price)): Path<(String, String)>,
) -> Result<Json<PriceUpdatedResponse>> {
    let id = parse_id(&id)?;

    let property = state
        .store()
        .relist(id, &price)
        .await?
        .ok_or_else(property_not_found)?;

    tracing::info!(property_id = %id, price = %property.price, "Property relisted");

    Ok(Json(PriceUpdatedResponse {
        message: PRICE_UPDATED,
        updated_property: property,
    }))
}

/// Record a transfer: set owner and price, and take the property off the market.
///
/// # Errors
///
/// Returns 400 for a malformed id or body, 404 if absent, 500 if the store fails.
pub async fn transfer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<Property>> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let property = state
        .store()
        .delist(id, &body.owner, &body.price)
        .await?
        .ok_or_else(property_not_found)?;

    tracing::info!(
        property_id = %id,
        owner = %property.owner,
        price = %property.price,
        "Property transferred and delisted"
    );

    Ok(Json(property))
}

/// Delete a property and return the removed record.
///
/// Stored image files are left in place.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 if absent, 500 if the store fails.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    let id = parse_id(&id)?;

    let property = state
        .store()
        .delete(id)
        .await?
        .ok_or_else(property_not_found)?;

    tracing::info!(property_id = %id, "Property deleted");

    Ok(Json(DeletedResponse {
        message: PROPERTY_DELETED,
        deleted_property: property,
    }))
}
