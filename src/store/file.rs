use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{prepare_for_write, SchemaStore, StoreError};
use crate::schema::SchemaResource;

/// Store persisting the schema as a single JSON document on disk, matching
/// the one-document-per-deployment storage of the original backend.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Writes are serialized so two concurrent updates never interleave on
    // disk; last-write-wins is still the resulting semantics.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SchemaStore for FileStore {
    async fn get_schema(&self) -> Result<SchemaResource, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound("No schema has been created yet".to_string()))
            }
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to read schema document: {}",
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Unavailable(format!("Schema document is not valid JSON: {}", e))
        })
    }

    async fn update_schema(&self, resource: SchemaResource) -> Result<SchemaResource, StoreError> {
        let prepared = prepare_for_write(resource)?;
        let json = serde_json::to_vec_pretty(&prepared)
            .map_err(|e| StoreError::Unavailable(format!("Failed to encode schema: {}", e)))?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        // Write-then-rename keeps a reader from ever seeing a torn document.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to write schema document: {}", e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to replace schema document: {}", e))
        })?;

        tracing::debug!(path = %self.path.display(), "schema document replaced");
        Ok(prepared)
    }
}
