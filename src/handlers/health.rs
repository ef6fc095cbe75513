use axum::{extract::State, response::Json};
use serde_json::json;

use crate::{
    error::Result,
    handlers::AppState,
    utils::{file::public_url, time::to_iso_millis},
};

const ENDPOINTS: [&str; 6] = [
    "GET /api/daily-challenge",
    "POST /api/create-account",
    "POST /api/upload-submission",
    "GET /api/submissions",
    "GET /api/leaderboard",
    "GET /api/health",
];

const DEBUG_ENDPOINTS: [&str; 2] = ["GET /api/debug/files", "POST /api/test-submission"];

pub async fn index(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let (users, submissions) = state.database.counts().await;
    let uploaded_files = state.storage.list().await?.len();

    let mut endpoints: Vec<&str> = ENDPOINTS.to_vec();
    if state.config.enable_debug_routes {
        endpoints.extend(DEBUG_ENDPOINTS);
    }

    Ok(Json(json!({
        "message": "Mittweida App Server is running!",
        "status": "OK",
        "timestamp": to_iso_millis(&chrono::Utc::now()),
        "stats": {
            "submissions": submissions,
            "users": users,
            "uploadedFiles": uploaded_files
        },
        "availableEndpoints": endpoints
    })))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let files = state.storage.list().await?;
    let (users, submissions) = state.database.counts().await;
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

    Ok(Json(json!({
        "status": "OK",
        "timestamp": to_iso_millis(&chrono::Utc::now()),
        "uploadsDir": state.storage.location(),
        "submissions": submissions,
        "users": users,
        "uploadedFiles": files.len(),
        "files": names
    })))
}

pub async fn debug_files(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let files: Vec<serde_json::Value> = state
        .storage
        .list()
        .await?
        .into_iter()
        .map(|file| {
            json!({
                "name": file.name,
                "size": file.size,
                "modified": to_iso_millis(&file.modified),
                "url": public_url(&file.name)
            })
        })
        .collect();

    Ok(Json(json!({ "files": files })))
}
