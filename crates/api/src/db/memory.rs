//! In-process property store.
//!
//! Keeps properties in insertion order behind a `tokio::sync::RwLock`. Used by
//! the test suites and by `PROPERTYHUB_STORE=memory` for running the API
//! without `PostgreSQL`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use propertyhub_core::{ListingStatus, NewProperty, Property, PropertyId};

use super::{PropertyStore, RepositoryError};

/// Property store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    properties: RwLock<Vec<Property>>,
}

impl InMemoryPropertyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored properties.
    pub async fn len(&self) -> usize {
        self.properties.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.properties.read().await.is_empty()
    }

    async fn update<F>(&self, id: PropertyId, apply: F) -> Option<Property>
    where
        F: FnOnce(&mut Property) + Send,
    {
        let mut properties = self.properties.write().await;
        let property = properties.iter_mut().find(|p| p.id == id)?;
        apply(property);
        property.updated_at = Utc::now();
        Some(property.clone())
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn create(&self, input: NewProperty) -> Result<Property, RepositoryError> {
        let property = input.into_property(PropertyId::generate(), Utc::now());
        self.properties.write().await.push(property.clone());
        Ok(property)
    }

    async fn list_for_sale(&self) -> Result<Vec<Property>, RepositoryError> {
        let properties = self.properties.read().await;
        Ok(properties
            .iter()
            .filter(|p| p.for_sale.is_listed())
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Property>, RepositoryError> {
        let properties = self.properties.read().await;
        Ok(properties
            .iter()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    async fn get(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let properties = self.properties.read().await;
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn relist(
        &self,
        id: PropertyId,
        price: &str,
    ) -> Result<Option<Property>, RepositoryError> {
        Ok(self
            .update(id, |p| {
                p.price = price.to_owned();
                p.for_sale = ListingStatus::Listed;
            })
            .await)
    }

    async fn delist(
        &self,
        id: PropertyId,
        owner: &str,
        price: &str,
    ) -> Result<Option<Property>, RepositoryError> {
        Ok(self
            .update(id, |p| {
                p.owner = owner.to_owned();
                p.price = price.to_owned();
                p.for_sale = ListingStatus::Delisted;
            })
            .await)
    }

    async fn delete(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let mut properties = self.properties.write().await;
        let position = properties.iter().position(|p| p.id == id);
        Ok(position.map(|index| properties.remove(index)))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(owner: &str, images: usize) -> NewProperty {
        let images = (0..images).map(|i| format!("uploads/{i}.png")).collect();
        NewProperty::new("ext-1", "two-room flat", "100", owner, images).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_lists() {
        let store = InMemoryPropertyStore::new();
        let a = store.create(input("alice", 2)).await.unwrap();
        let b = store.create(input("alice", 0)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.for_sale, ListingStatus::Listed);
        assert_eq!(a.images.len(), 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_relist_always_lists() {
        let store = InMemoryPropertyStore::new();
        let created = store.create(input("alice", 0)).await.unwrap();
        store.delist(created.id, "bob", "200").await.unwrap();

        let relisted = store.relist(created.id, "150").await.unwrap().unwrap();
        assert_eq!(relisted.price, "150");
        assert_eq!(relisted.owner, "bob");
        assert_eq!(relisted.for_sale, ListingStatus::Listed);

        // Already listed stays listed
        let again = store.relist(created.id, "175").await.unwrap().unwrap();
        assert_eq!(again.for_sale, ListingStatus::Listed);
    }

    #[tokio::test]
    async fn test_delist_always_delists() {
        let store = InMemoryPropertyStore::new();
        let created = store.create(input("alice", 0)).await.unwrap();

        for _ in 0..2 {
            let updated = store.delist(created.id, "bob", "200").await.unwrap().unwrap();
            assert_eq!(updated.owner, "bob");
            assert_eq!(updated.price, "200");
            assert_eq!(updated.for_sale, ListingStatus::Delisted);
        }
    }

    #[tokio::test]
    async fn test_list_for_sale_excludes_delisted() {
        let store = InMemoryPropertyStore::new();
        let listed = store.create(input("alice", 0)).await.unwrap();
        let sold = store.create(input("alice", 0)).await.unwrap();
        store.delist(sold.id, "bob", "1").await.unwrap();

        let for_sale = store.list_for_sale().await.unwrap();
        assert_eq!(for_sale.len(), 1);
        assert_eq!(for_sale[0].id, listed.id);
    }

    #[tokio::test]
    async fn test_list_by_owner_is_exact() {
        let store = InMemoryPropertyStore::new();
        store.create(input("alice", 0)).await.unwrap();
        store.create(input("Alice", 0)).await.unwrap();
        store.create(input("alice ", 0)).await.unwrap();

        let owned = store.list_by_owner("alice").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].owner, "alice");
        assert!(store.list_by_owner("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_ids_return_none() {
        let store = InMemoryPropertyStore::new();
        let id = PropertyId::generate();

        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.relist(id, "1").await.unwrap().is_none());
        assert!(store.delist(id, "bob", "1").await.unwrap().is_none());
        assert!(store.delete(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryPropertyStore::new();
        let created = store.create(input("alice", 1)).await.unwrap();

        let deleted = store.delete(created.id).await.unwrap().unwrap();
        assert_eq!(deleted, created);
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
