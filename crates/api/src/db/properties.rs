//! `PostgreSQL`-backed property store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use propertyhub_core::{ListingStatus, NewProperty, Property, PropertyId};

use super::{PropertyStore, RepositoryError};

const PROPERTY_COLUMNS: &str =
    "id, id_property, description, price, owner, for_sale, images, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for property queries.
#[derive(Debug, sqlx::FromRow)]
struct PropertyRow {
    id: Uuid,
    id_property: String,
    description: String,
    price: String,
    owner: String,
    for_sale: i16,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = RepositoryError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let for_sale = ListingStatus::try_from(row.for_sale).map_err(|e| {
            RepositoryError::DataCorruption(format!("property {}: {e}", row.id))
        })?;

        Ok(Self {
            id: PropertyId::from_uuid(row.id),
            id_property: row.id_property,
            description: row.description,
            price: row.price,
            owner: row.owner,
            for_sale,
            images: row.images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_properties(rows: Vec<PropertyRow>) -> Result<Vec<Property>, RepositoryError> {
    rows.into_iter().map(Property::try_from).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Property store over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgPropertyStore {
    pool: PgPool,
}

impl PgPropertyStore {
    /// Create a new property store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PropertyStore for PgPropertyStore {
    async fn create(&self, input: NewProperty) -> Result<Property, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            INSERT INTO properties (id_property, description, price, owner, for_sale, images)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROPERTY_COLUMNS}
            "
        ))
        .bind(input.id_property())
        .bind(input.description())
        .bind(input.price())
        .bind(input.owner())
        .bind(ListingStatus::Listed)
        .bind(input.images().to_vec())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_for_sale(&self) -> Result<Vec<Property>, RepositoryError> {
        let rows = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            SELECT {PROPERTY_COLUMNS}
            FROM properties
            WHERE for_sale = $1
            ORDER BY created_at ASC, id ASC
            "
        ))
        .bind(ListingStatus::Listed)
        .fetch_all(&self.pool)
        .await?;

        into_properties(rows)
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Property>, RepositoryError> {
        let rows = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            SELECT {PROPERTY_COLUMNS}
            FROM properties
            WHERE owner = $1
            ORDER BY created_at ASC, id ASC
            "
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        into_properties(rows)
    }

    async fn get(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            SELECT {PROPERTY_COLUMNS}
            FROM properties
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Property::try_from).transpose()
    }

    async fn relist(
        &self,
        id: PropertyId,
        price: &str,
    ) -> Result<Option<Property>, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            UPDATE properties
            SET price = $2, for_sale = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROPERTY_COLUMNS}
            "
        ))
        .bind(id)
        .bind(price)
        .bind(ListingStatus::Listed)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Property::try_from).transpose()
    }

    async fn delist(
        &self,
        id: PropertyId,
        owner: &str,
        price: &str,
    ) -> Result<Option<Property>, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            UPDATE properties
            SET owner = $2, price = $3, for_sale = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROPERTY_COLUMNS}
            "
        ))
        .bind(id)
        .bind(owner)
        .bind(price)
        .bind(ListingStatus::Delisted)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Property::try_from).transpose()
    }

    async fn delete(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r"
            DELETE FROM properties
            WHERE id = $1
            RETURNING {PROPERTY_COLUMNS}
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Property::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(for_sale: i16) -> PropertyRow {
        let now = Utc::now();
        PropertyRow {
            id: Uuid::new_v4(),
            id_property: "p1".to_string(),
            description: "flat".to_string(),
            price: "100".to_string(),
            owner: "alice".to_string(),
            for_sale,
            images: vec!["uploads/a.jpg".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let property = Property::try_from(row(0)).expect("valid row");
        assert_eq!(property.for_sale, ListingStatus::Delisted);
        assert_eq!(property.images, vec!["uploads/a.jpg".to_string()]);
    }

    #[test]
    fn test_row_with_invalid_flag_is_corruption() {
        let err = Property::try_from(row(3)).expect_err("flag 3 is invalid");
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
