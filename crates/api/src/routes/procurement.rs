use axum::routing::post;
use axum::Router;

use crate::handlers::procurement;
use crate::state::AppState;

/// ```text
/// POST   /procurement-requests                 -> submit_request
/// POST   /procurement-requests/{id}/approve    -> approve_request
/// POST   /procurement-requests/{id}/reject     -> reject_request
/// POST   /procurement-requests/{id}/complete   -> complete_request
/// POST   /quotations                           -> record_quotation
/// ```
pub fn procurement_router() -> Router<AppState> {
    Router::new()
        .route("/procurement-requests", post(procurement::submit_request))
        .route("/procurement-requests/{id}/approve", post(procurement::approve_request))
        .route("/procurement-requests/{id}/reject", post(procurement::reject_request))
        .route("/procurement-requests/{id}/complete", post(procurement::complete_request))
        .route("/quotations", post(procurement::record_quotation))
}
