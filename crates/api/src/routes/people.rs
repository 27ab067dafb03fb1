use axum::routing::post;
use axum::Router;

use crate::handlers::{commerce, people};
use crate::state::AppState;

/// ```text
/// POST   /employees                   -> register_employee
/// POST   /employees/{id}/deactivate   -> deactivate_employee
/// POST   /vendors                     -> register_vendor
/// POST   /suppliers                   -> register_supplier
/// POST   /customers                   -> register_customer
/// POST   /customers/{id}/orders       -> place_order
/// ```
pub fn people_router() -> Router<AppState> {
    Router::new()
        .route("/employees", post(people::register_employee))
        .route("/employees/{id}/deactivate", post(people::deactivate_employee))
        .route("/vendors", post(people::register_vendor))
        .route("/suppliers", post(people::register_supplier))
        .route("/customers", post(people::register_customer))
        .route("/customers/{id}/orders", post(commerce::place_order))
}
