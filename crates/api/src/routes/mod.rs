pub mod assets;
pub mod health;
pub mod maintenance;
pub mod people;
pub mod procurement;
pub mod returns;
pub mod stock;
pub mod validation;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /validate/{entity}                       schema dry run (POST create, PATCH update)
///
/// /employees, /vendors, /suppliers, /customers   registration
/// /customers/{id}/orders                   place order
///
/// /assets, /assignments                    asset lifecycle
/// /repair-services                         maintenance lifecycle
/// /buffer-stocks, /consumptions            stock lifecycle
/// /procurement-requests, /quotations       procurement
/// /return-requests                         returns
///
/// /rules/check                             read-only rule check
/// /events                                  recent events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/validate", validation::validation_router())
        .merge(people::people_router())
        .merge(assets::assets_router())
        .nest("/repair-services", maintenance::maintenance_router())
        .merge(stock::stock_router())
        .merge(procurement::procurement_router())
        .nest("/return-requests", returns::returns_router())
        .route("/rules/check", post(handlers::rules::check))
        .route("/events", get(handlers::events::list_events))
}
