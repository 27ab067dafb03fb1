use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// ```text
/// POST   /assets                    -> register_asset
/// GET    /assets/{id}               -> get_asset
/// POST   /assets/{id}/dispose       -> dispose_asset
/// POST   /assets/{id}/lost          -> mark_asset_lost
/// POST   /assignments               -> assign_asset
/// POST   /assignments/{id}/return   -> return_asset
/// ```
pub fn assets_router() -> Router<AppState> {
    Router::new()
        .route("/assets", post(assets::register_asset))
        .route("/assets/{id}", get(assets::get_asset))
        .route("/assets/{id}/dispose", post(assets::dispose_asset))
        .route("/assets/{id}/lost", post(assets::mark_asset_lost))
        .route("/assignments", post(assets::assign_asset))
        .route("/assignments/{id}/return", post(assets::return_asset))
}
