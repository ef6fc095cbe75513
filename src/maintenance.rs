//! Data wipe used by the `reset-data` binary.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::{
    config::Config,
    database::persist::write_collection,
    models::{Submission, User},
    storage::{local::LocalStorage, Storage},
};

#[derive(Debug, Default, PartialEq)]
pub struct ResetReport {
    pub cleared_documents: Vec<PathBuf>,
    pub deleted_files: usize,
}

/// Empties the user and submission documents that exist and deletes every
/// uploaded file. Missing documents and a missing uploads directory are left
/// missing.
pub async fn reset_all(config: &Config) -> Result<ResetReport> {
    let mut report = ResetReport::default();

    let submissions_file = config.submissions_file();
    if submissions_file.exists() {
        write_collection::<Submission>(&submissions_file, &[]).await?;
        info!("Cleared {}", submissions_file.display());
        report.cleared_documents.push(submissions_file);
    }

    let users_file = config.users_file();
    if users_file.exists() {
        write_collection::<User>(&users_file, &[]).await?;
        info!("Cleared {}", users_file.display());
        report.cleared_documents.push(users_file);
    }

    if config.upload_dir.exists() {
        let storage = LocalStorage::new(&config.upload_dir)?;
        let files = storage.list().await?;
        for file in &files {
            storage.delete(&file.name).await?;
        }
        report.deleted_files = files.len();
        info!("Cleared {} uploaded files", files.len());
    } else {
        info!("Uploads directory does not exist");
    }

    Ok(report)
}
