//! Axum route handlers for the dashboard surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dashboard::pipeline;
use crate::dashboard::view::DashboardView;
use crate::errors::AppError;
use crate::session::CvSession;
use crate::state::AppState;
use crate::storage;

const NO_SESSION_MESSAGE: &str = "No CV found for this session.";

fn file_url(state: &AppState, session: &CvSession) -> String {
    storage::public_url(
        &state.config.storage_public_base,
        &state.config.s3_bucket,
        &session.file.path,
    )
}

/// GET /api/v1/dashboard/:session_id
///
/// Returns the full view state for the session's current file: phase, file
/// identity and public URL, extracted text, profile, roles, and the static
/// panels.
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::SessionMissing(NO_SESSION_MESSAGE.to_string()))?;

    let url = file_url(&state, &session);
    Ok(Json(DashboardView::from_session(&session, url)))
}

/// POST /api/v1/dashboard/:session_id/analyze
///
/// Supersedes any in-flight run, resets derived state, and spawns the
/// extraction → summary → roles pipeline. Returns 202 with the view as of
/// the reset; the client polls the dashboard for progress.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DashboardView>), AppError> {
    let (epoch, session) = state
        .sessions
        .begin_analysis(session_id)
        .await
        .ok_or_else(|| AppError::SessionMissing(NO_SESSION_MESSAGE.to_string()))?;

    let url = file_url(&state, &session);
    tokio::spawn(pipeline::run(state.clone(), session_id, epoch, url.clone()));

    Ok((
        StatusCode::ACCEPTED,
        Json(DashboardView::from_session(&session, url)),
    ))
}
