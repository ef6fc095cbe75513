use axum::{extract::State, response::Json};
use tracing::debug;

use crate::{
    error::Result,
    handlers::AppState,
    models::SubmissionView,
    services::SubmissionService,
};

pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionView>>> {
    let submissions =
        SubmissionService::list_submissions(&state.database, state.storage.as_ref()).await?;
    debug!("Returning submissions: {}", submissions.len());
    Ok(Json(submissions))
}
