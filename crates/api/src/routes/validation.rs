use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Schema dry runs.
///
/// ```text
/// POST   /{entity}    -> validate_new
/// PATCH  /{entity}    -> validate_update
/// ```
pub fn validation_router() -> Router<AppState> {
    Router::new().route(
        "/{entity}",
        post(validation::validate_new).patch(validation::validate_update),
    )
}
