use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::json;

use crate::{
    error::Result,
    handlers::AppState,
    models::CreateAccountRequest,
    services::AccountService,
};

pub async fn create_account(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(request) = payload?;
    let user = AccountService::create_account(&state.database, request).await?;

    Ok(Json(json!({
        "message": "Account created successfully",
        "user": user
    })))
}
