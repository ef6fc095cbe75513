use std::sync::Arc;
use tracing::info;

use crate::{
    error::{AppError, Result},
    storage::Storage,
    utils::file::{generate_upload_filename, public_url, resolve_extension},
};

/// A file part read from a request but not yet written anywhere.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field_name: String,
    pub original_filename: Option<String>,
    pub mime_type: mime::Mime,
    pub data: Vec<u8>,
}

/// A file that has been written to the uploads directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub filename: String,
    pub public_url: String,
    pub size: usize,
    pub mime_type: String,
}

/// Validates image uploads and writes accepted ones under a generated name.
#[derive(Clone)]
pub struct UploadReceiver {
    storage: Arc<dyn Storage>,
    max_file_size: usize,
}

impl UploadReceiver {
    pub fn new(storage: Arc<dyn Storage>, max_file_size: usize) -> Self {
        Self {
            storage,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Parses a declared content type; only `image/*` passes.
    pub fn check_content_type(content_type: Option<&str>) -> Result<mime::Mime> {
        let mime_type: mime::Mime = content_type
            .and_then(|ct| ct.parse().ok())
            .ok_or(AppError::InvalidFileType)?;

        if mime_type.type_() != mime::IMAGE {
            return Err(AppError::InvalidFileType);
        }
        Ok(mime_type)
    }

    pub fn check_size(&self, len: usize) -> Result<()> {
        if len > self.max_file_size {
            return Err(AppError::FileTooLarge {
                max_bytes: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Writes exactly one file on success and none on failure.
    pub async fn accept(&self, file: IncomingFile) -> Result<StoredUpload> {
        if file.mime_type.type_() != mime::IMAGE {
            return Err(AppError::InvalidFileType);
        }
        self.check_size(file.data.len())?;

        let extension = resolve_extension(file.original_filename.as_deref(), &file.mime_type);
        let filename = generate_upload_filename(&file.field_name, &extension);
        info!("Saving file as: {}", filename);

        self.storage.store(&filename, &file.data).await?;

        if !self.storage.exists(&filename).await? {
            return Err(AppError::UploadFailed(filename));
        }

        Ok(StoredUpload {
            public_url: public_url(&filename),
            filename,
            size: file.data.len(),
            mime_type: file.mime_type.essence_str().to_string(),
        })
    }
}
