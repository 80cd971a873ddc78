//! Axum route handlers for the upload surface.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::UploadedFile;
use crate::state::AppState;
use crate::storage;

/// The one MIME type the upload surface accepts.
const ACCEPTED_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// When present, the upload replaces the file of this existing session
    /// instead of creating a new one (the dashboard's re-upload path).
    pub session: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub file: UploadedFile,
    pub file_url: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/v1/uploads
///
/// Stores the submitted PDF under `cvs/<original file name>` with a fixed
/// non-overwrite policy (a second upload of the same name is a 409), then
/// creates — or, on re-upload, resets — the session that hands the file
/// identity to the dashboard. A failed upload leaves no session behind and
/// is not retried.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let (file_name, mime_type, data) = read_cv_field(&mut multipart).await?;

    if mime_type != ACCEPTED_MIME_TYPE {
        return Err(AppError::Validation(format!(
            "only {ACCEPTED_MIME_TYPE} uploads are accepted, got '{mime_type}'"
        )));
    }
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let key = storage::object_key(&file_name);
    storage::upload(&state.s3, &state.config.s3_bucket, &key, data, &mime_type).await?;

    let file = UploadedFile {
        path: key,
        name: file_name,
        mime_type,
    };

    let (session_id, session) = match params.session {
        // Re-upload: reset the existing session to Idle with the new file
        // identity, superseding any in-flight analysis.
        Some(id) => {
            let session = state
                .sessions
                .replace_file(id, file)
                .await
                .ok_or_else(|| {
                    AppError::SessionMissing("No CV session to replace.".to_string())
                })?;
            (id, session)
        }
        None => state.sessions.create(file).await,
    };

    let file_url = storage::public_url(
        &state.config.storage_public_base,
        &state.config.s3_bucket,
        &session.file.path,
    );

    info!(
        "CV '{}' submitted under session {session_id}",
        session.file.name
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            session_id,
            file: session.file.clone(),
            file_url,
            expires_at: session.expires_at,
        }),
    ))
}

/// Pulls the `file` field out of the multipart body.
async fn read_cv_field(multipart: &mut Multipart) -> Result<(String, String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("cv.pdf").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("invalid file payload: {e}")))?;
            return Ok((file_name, mime_type, data));
        }
    }

    Err(AppError::Validation(
        "multipart body must contain a 'file' field".to_string(),
    ))
}
