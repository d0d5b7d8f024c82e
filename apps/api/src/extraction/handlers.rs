//! Axum route handlers for the extraction API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// A single uploaded document, alive only for the duration of one request.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// Pulls the `file` part out of a multipart body.
/// A missing part, or a `file` part sent as a plain form value, is `NoFileProvided`.
pub async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(AppError::NoFileProvided);
        };
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedDocument { filename, bytes });
    }
    Err(AppError::NoFileProvided)
}

/// A body cut off by the upload limit is reported as such; anything else is a
/// malformed form.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(err.body_text())
    }
}

/// Reads the upload and extracts its text on the blocking pool.
pub async fn extract_upload(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<String, AppError> {
    let upload = read_upload(multipart).await?;
    info!(
        "Received upload {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );
    state
        .extractor
        .extract_in_background(upload.bytes, upload.filename, state.config.extract_timeout)
        .await
}

/// POST /api/extract-text
pub async fn handle_extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let text = extract_upload(&state, &mut multipart).await?;
    Ok(Json(ExtractTextResponse { text }))
}
