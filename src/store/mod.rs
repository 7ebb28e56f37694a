use async_trait::async_trait;
use chrono::Utc;

use crate::schema::SchemaResource;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Schema not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unavailable(String),
}

/// Accessor for the single logical schema resource.
///
/// `update_schema` replaces the stored resource wholesale; there are no
/// partial/merge semantics. Concurrent updates are last-write-wins.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    async fn get_schema(&self) -> Result<SchemaResource, StoreError>;
    async fn update_schema(&self, resource: SchemaResource) -> Result<SchemaResource, StoreError>;
}

/// Shared write-path preparation: enforce shape constraints, then stamp
/// `updated_at` with the current time. The caller's submitted `updated_at`
/// is discarded.
pub(crate) fn prepare_for_write(mut resource: SchemaResource) -> Result<SchemaResource, StoreError> {
    resource.validate().map_err(StoreError::Validation)?;
    resource.updated_at = Utc::now();
    Ok(resource)
}
