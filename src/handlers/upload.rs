use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    services::{IncomingFile, SubmissionFields, SubmissionService, UploadReceiver},
};

/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "photo";

pub async fn upload_submission(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>> {
    info!("Upload submission request received");
    let mut multipart = multipart?;

    let max_file_size = state.uploads.max_file_size();
    let mut fields = SubmissionFields::default();
    let mut photo: Option<IncomingFile> = None;

    // Buffer every part first; nothing touches disk until the whole request checks out.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            PHOTO_FIELD => {
                photo = Some(read_photo(field, &state.uploads).await?);
            }
            "challengeId" => fields.challenge_id = Some(read_text(field, max_file_size).await?),
            "userId" => fields.user_id = Some(read_text(field, max_file_size).await?),
            "userName" => fields.user_name = Some(read_text(field, max_file_size).await?),
            _ => {} // Ignore unknown fields
        }
    }

    let (form, file) = SubmissionService::prepare(fields, photo)?;
    let stored = state.uploads.accept(file).await?;
    info!(
        filename = %stored.filename,
        size = stored.size,
        mime_type = %stored.mime_type,
        "File accepted"
    );

    let submission = SubmissionService::create_submission(&state.database, form, &stored).await;

    Ok(Json(json!({
        "message": "Submission uploaded successfully",
        "submission": submission
    })))
}

pub async fn test_submission(State(state): State<AppState>) -> Json<serde_json::Value> {
    let submission = SubmissionService::create_test_submission(&state.database).await;

    Json(json!({
        "message": "Test submission created",
        "submission": submission
    }))
}

/// Rejects non-images from the part headers alone, then streams the body,
/// stopping as soon as it crosses the size ceiling.
async fn read_photo(mut field: Field<'_>, receiver: &UploadReceiver) -> Result<IncomingFile> {
    let mime_type = UploadReceiver::check_content_type(field.content_type())?;
    let field_name = field.name().unwrap_or(PHOTO_FIELD).to_string();
    let original_filename = field.file_name().map(str::to_string);

    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, receiver.max_file_size()))?
    {
        receiver.check_size(data.len() + chunk.len())?;
        data.extend_from_slice(&chunk);
    }

    Ok(IncomingFile {
        field_name,
        original_filename,
        mime_type,
        data,
    })
}

async fn read_text(field: Field<'_>, max_file_size: usize) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, max_file_size))
}

fn multipart_error(error: MultipartError, max_file_size: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge {
            max_bytes: max_file_size,
        }
    } else {
        AppError::Validation(format!("Failed to parse multipart data: {}", error))
    }
}
