use axum::routing::post;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Mounted at `/repair-services`.
///
/// ```text
/// POST   /                 -> schedule_service
/// POST   /{id}/start       -> start_service
/// POST   /{id}/complete    -> complete_service
/// ```
pub fn maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(maintenance::schedule_service))
        .route("/{id}/start", post(maintenance::start_service))
        .route("/{id}/complete", post(maintenance::complete_service))
}
