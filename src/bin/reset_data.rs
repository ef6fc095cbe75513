//! Wipes all app data: empties the user and submission documents (when they
//! exist) and deletes every uploaded file.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use city_quest_server::{config::Config, maintenance::reset_all};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Resetting all data");

    let report = reset_all(&config).await?;

    info!(
        documents = report.cleared_documents.len(),
        files = report.deleted_files,
        "Reset complete!"
    );
    Ok(())
}
