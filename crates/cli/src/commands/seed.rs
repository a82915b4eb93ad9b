//! Seed the database with demo listings.
//!
//! Inserts a handful of properties through the same store the API uses, so
//! the rows look exactly like ones created over HTTP (listed, no images).

use tracing::info;

use propertyhub_api::db::{self, PgPropertyStore, PropertyStore};
use propertyhub_core::NewProperty;

/// Demo listings as `(id, description, price, owner)`.
const DEMO_LISTINGS: &[(&str, &str, &str, &str)] = &[
    ("LAND-0001", "Two-bedroom flat near the harbour", "120000", "0x8f3c5a17e2b94d06"),
    ("LAND-0002", "Detached house with garden", "245000", "0x8f3c5a17e2b94d06"),
    ("LAND-0003", "Studio above the old market", "64000", "0x1d2e3f4a5b6c7d8e"),
];

/// Insert the demo listings.
///
/// Running it twice inserts the listings twice; ids are store-assigned.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn demo_listings() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()
        .ok_or_else(|| format!("{} not set", super::DATABASE_URL_VAR))?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store = PgPropertyStore::new(pool);
    for (id_property, description, price, owner) in DEMO_LISTINGS {
        let input = NewProperty::new(*id_property, *description, *price, *owner, Vec::new())?;
        let property = store.create(input).await?;
        info!(property_id = %property.id, id_property, owner, "Inserted demo listing");
    }

    info!("Seeding complete! {} listings inserted", DEMO_LISTINGS.len());
    Ok(())
}
