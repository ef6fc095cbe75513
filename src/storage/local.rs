use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::{
    error::{AppError, Result},
    storage::{Storage, StoredFileInfo},
    utils::file::is_plain_filename,
};

pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path).map_err(|e| {
                AppError::Storage(format!("Failed to create uploads directory: {}", e))
            })?;
            info!("Created uploads directory: {}", base_path.display());
        }

        Ok(Self { base_path })
    }

    fn get_full_path(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_filename(name) {
            return Err(AppError::Storage(format!("Invalid file name: {:?}", name)));
        }
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.get_full_path(name)?;

        fs::write(&full_path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.get_full_path(name)?;

        fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::FileNotFound,
            _ => AppError::Storage(format!("Failed to read file: {}", e)),
        })
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let full_path = self.get_full_path(name)?;

        fs::remove_file(&full_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file: {}", e)))?;

        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        match self.get_full_path(name) {
            Ok(full_path) => Ok(fs::try_exists(&full_path).await.unwrap_or(false)),
            Err(_) => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<StoredFileInfo>> {
        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read uploads directory: {}", e)))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let modified: DateTime<Utc> = metadata.modified()?.into();
            files.push(StoredFileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                modified,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    fn location(&self) -> String {
        self.base_path.display().to_string()
    }
}
