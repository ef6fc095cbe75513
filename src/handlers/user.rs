use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::PublicUser,
    services::AccountService,
};

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PublicUser>> {
    // A non-numeric id can never match a stored user.
    let user_id: i64 = user_id.trim().parse().map_err(|_| AppError::UserNotFound)?;

    let user = AccountService::get_user(&state.database, user_id).await?;
    Ok(Json(user))
}
