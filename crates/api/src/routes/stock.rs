use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stock;
use crate::state::AppState;

/// ```text
/// POST   /buffer-stocks                  -> register_buffer_stock
/// GET    /buffer-stocks/{id}             -> get_buffer_stock
/// POST   /buffer-stocks/{id}/consume     -> consume_stock
/// POST   /buffer-stocks/{id}/restock     -> restock
/// POST   /consumptions/{id}/approve      -> approve_consumption
/// POST   /consumptions/{id}/complete     -> complete_consumption
/// ```
pub fn stock_router() -> Router<AppState> {
    Router::new()
        .route("/buffer-stocks", post(stock::register_buffer_stock))
        .route("/buffer-stocks/{id}", get(stock::get_buffer_stock))
        .route("/buffer-stocks/{id}/consume", post(stock::consume_stock))
        .route("/buffer-stocks/{id}/restock", post(stock::restock))
        .route("/consumptions/{id}/approve", post(stock::approve_consumption))
        .route("/consumptions/{id}/complete", post(stock::complete_consumption))
}
