use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a JSON array document. A missing file is an empty collection.
pub async fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Rewrites the whole document: serialize, write to a sibling temp file, then
/// rename over `path` so readers never see a half-written array.
pub async fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(records)?;
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;

    Ok(())
}
