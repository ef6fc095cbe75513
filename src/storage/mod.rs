use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

pub mod local;

/// Metadata of one stored upload, as listed by the diagnostics endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFileInfo {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Flat namespace of uploaded files addressed by plain file name.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn store(&self, name: &str, data: &[u8]) -> Result<()>;

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>>;

    async fn delete(&self, name: &str) -> Result<()>;

    async fn exists(&self, name: &str) -> Result<bool>;

    async fn list(&self) -> Result<Vec<StoredFileInfo>>;

    /// Human-readable location, reported by the health endpoint.
    fn location(&self) -> String;
}

pub fn create_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = local::LocalStorage::new(&config.upload_dir)?;
    Ok(Arc::new(storage))
}
