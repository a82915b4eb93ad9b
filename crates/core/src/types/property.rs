//! The `Property` record and its views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListingStatus, PropertyId};

/// Maximum number of images accepted when a property is created.
pub const MAX_IMAGES_PER_PROPERTY: usize = 5;

/// Errors that can occur when building a [`NewProperty`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NewPropertyError {
    /// More images than [`MAX_IMAGES_PER_PROPERTY`] were supplied.
    #[error("at most {max} images are accepted (got {got})")]
    TooManyImages {
        /// Maximum allowed.
        max: usize,
        /// Number supplied.
        got: usize,
    },
}

/// A stored property listing.
///
/// Serialized with camelCase field names, so `forSale` is rendered as the
/// integer flag `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Store-assigned identifier.
    pub id: PropertyId,
    /// Caller-supplied external identifier (e.g. from an outside ledger).
    pub id_property: String,
    pub description: String,
    /// Price as supplied by the caller. Never interpreted numerically.
    pub price: String,
    /// Identifier of the current owner.
    pub owner: String,
    pub for_sale: ListingStatus,
    /// Stored image paths, in upload order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// The subset view returned by the get-by-id lookup.
    #[must_use]
    pub fn summary(&self) -> PropertySummary {
        PropertySummary {
            id_property: self.id_property.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            owner: self.owner.clone(),
            for_sale: self.for_sale,
        }
    }
}

/// Public subset of a [`Property`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id_property: String,
    pub description: String,
    pub price: String,
    pub owner: String,
    pub for_sale: ListingStatus,
}

impl From<Property> for PropertySummary {
    fn from(property: Property) -> Self {
        Self {
            id_property: property.id_property,
            description: property.description,
            price: property.price,
            owner: property.owner,
            for_sale: property.for_sale,
        }
    }
}

/// Input for creating a property.
///
/// New properties are always created as [`ListingStatus::Listed`]; there is
/// deliberately no field for the listing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    id_property: String,
    description: String,
    price: String,
    owner: String,
    images: Vec<String>,
}

impl NewProperty {
    /// Build a new property input.
    ///
    /// # Errors
    ///
    /// Returns [`NewPropertyError::TooManyImages`] if more than
    /// [`MAX_IMAGES_PER_PROPERTY`] image paths are given.
    pub fn new(
        id_property: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        owner: impl Into<String>,
        images: Vec<String>,
    ) -> Result<Self, NewPropertyError> {
        if images.len() > MAX_IMAGES_PER_PROPERTY {
            return Err(NewPropertyError::TooManyImages {
                max: MAX_IMAGES_PER_PROPERTY,
                got: images.len(),
            });
        }

        Ok(Self {
            id_property: id_property.into(),
            description: description.into(),
            price: price.into(),
            owner: owner.into(),
            images,
        })
    }

    #[must_use]
    pub fn id_property(&self) -> &str {
        &self.id_property
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Materialize the record with a store-assigned id and timestamp.
    #[must_use]
    pub fn into_property(self, id: PropertyId, now: DateTime<Utc>) -> Property {
        Property {
            id,
            id_property: self.id_property,
            description: self.description,
            price: self.price,
            owner: self.owner,
            for_sale: ListingStatus::Listed,
            images: self.images,
            created_at: now,
            updated_at: now,
        }
    }
}
