use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::{
    config::Config,
    database::Database,
    error::Result,
    services::UploadReceiver,
    storage::{self, Storage},
};

pub mod accounts;
pub mod challenges;
pub mod files;
pub mod health;
pub mod leaderboard;
pub mod submissions;
pub mod upload;
pub mod user;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub storage: Arc<dyn Storage>,
    pub uploads: UploadReceiver,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let database = Database::open(&config.data_dir).await?;
        let storage = storage::create_storage(&config)?;
        let uploads = UploadReceiver::new(storage.clone(), config.max_file_size);

        Ok(Self {
            database,
            storage,
            uploads,
            config,
        })
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "status": StatusCode::NOT_FOUND.as_u16()
        })),
    )
}
