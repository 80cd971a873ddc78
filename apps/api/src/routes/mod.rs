pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::state::AppState;
use crate::upload::handlers as upload;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Upload surface
        .route("/api/v1/uploads", post(upload::handle_upload))
        // Dashboard surface
        .route(
            "/api/v1/dashboard/:session_id",
            get(dashboard::handle_get_dashboard),
        )
        .route(
            "/api/v1/dashboard/:session_id/analyze",
            post(dashboard::handle_analyze),
        )
        .with_state(state)
}
