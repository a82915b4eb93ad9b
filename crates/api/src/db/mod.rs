//! Property persistence.
//!
//! # Tables
//!
//! - `properties` - Property listings (one row per listing, images as `TEXT[]`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p propertyhub-cli -- migrate
//! ```
//!
//! # Stores
//!
//! Handlers only see the [`PropertyStore`] trait. [`PgPropertyStore`] is the
//! production implementation; [`InMemoryPropertyStore`] backs tests and
//! `PROPERTYHUB_STORE=memory`.

pub mod memory;
pub mod properties;

use std::time::Duration;

use async_trait::async_trait;
use propertyhub_core::{NewProperty, Property, PropertyId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::InMemoryPropertyStore;
pub use properties::PgPropertyStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot currently serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage operations on property listings.
///
/// Single-record operations return `Ok(None)` when no property has the given
/// id. The listing flag is never a free parameter: [`relist`](Self::relist)
/// always lists, [`delist`](Self::delist) always delists.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Persist a new listed property and return it with its assigned id.
    async fn create(&self, input: NewProperty) -> Result<Property, RepositoryError>;

    /// All properties currently for sale, oldest first.
    async fn list_for_sale(&self) -> Result<Vec<Property>, RepositoryError>;

    /// All properties whose owner equals `owner` exactly, oldest first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Property>, RepositoryError>;

    /// Fetch a single property.
    async fn get(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError>;

    /// Set a new price and put the property up for sale.
    async fn relist(&self, id: PropertyId, price: &str)
    -> Result<Option<Property>, RepositoryError>;

    /// Transfer the property to `owner` at `price` and take it off the market.
    async fn delist(
        &self,
        id: PropertyId,
        owner: &str,
        price: &str,
    ) -> Result<Option<Property>, RepositoryError>;

    /// Remove a property, returning the deleted record.
    async fn delete(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
