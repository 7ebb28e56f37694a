use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{prepare_for_write, SchemaStore, StoreError};
use crate::schema::SchemaResource;

/// In-memory store, used by tests and as an ephemeral dev backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Option<SchemaResource>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing resource.
    pub fn with_resource(resource: SchemaResource) -> Self {
        Self { inner: RwLock::new(Some(resource)) }
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn get_schema(&self) -> Result<SchemaResource, StoreError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or_else(|| StoreError::NotFound("No schema has been created yet".to_string()))
    }

    async fn update_schema(&self, resource: SchemaResource) -> Result<SchemaResource, StoreError> {
        let prepared = prepare_for_write(resource)?;
        *self.inner.write().await = Some(prepared.clone());
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_resource;

    #[tokio::test]
    async fn empty_store_reports_not_found() {
        let store = MemoryStore::new();
        let err = store.get_schema().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_then_get_round_trips() {
        let store = MemoryStore::new();
        let submitted = sample_resource();
        let stored = store.update_schema(submitted.clone()).await.unwrap();
        let fetched = store.get_schema().await.unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.name, submitted.name);
        assert_eq!(fetched.fields, submitted.fields);
        assert!(fetched.updated_at >= submitted.updated_at);
    }

    #[tokio::test]
    async fn get_is_idempotent() {
        let store = MemoryStore::with_resource(sample_resource());
        let a = serde_json::to_string(&store.get_schema().await.unwrap()).unwrap();
        let b = serde_json::to_string(&store.get_schema().await.unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
