use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    utils::file::is_plain_filename,
};

pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    debug!("Serving static file: {}", filename);

    if !is_plain_filename(&filename) {
        return Err(AppError::FileNotFound);
    }

    let data = state.storage.retrieve(&filename).await?;
    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        ],
        data,
    )
        .into_response())
}
