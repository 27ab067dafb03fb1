use axum::routing::{post, put};
use axum::Router;

use crate::handlers::commerce;
use crate::state::AppState;

/// Mounted at `/return-requests`.
///
/// ```text
/// POST   /                -> open_return_request
/// PUT    /{id}/status     -> set_return_status
/// POST   /{id}/label      -> mark_label_generated
/// POST   /{id}/confirm    -> confirm_final_status
/// ```
pub fn returns_router() -> Router<AppState> {
    Router::new()
        .route("/", post(commerce::open_return_request))
        .route("/{id}/status", put(commerce::set_return_status))
        .route("/{id}/label", post(commerce::mark_label_generated))
        .route("/{id}/confirm", post(commerce::confirm_final_status))
}
