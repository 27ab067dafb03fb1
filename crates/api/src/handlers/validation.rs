//! Validation dry-run endpoints.
//!
//! Run an entity's schema without touching the store, so clients can check
//! a form before submitting it.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::validation::{validate_create, validate_partial_update, EntityKind};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

fn entity_kind(name: &str) -> AppResult<EntityKind> {
    name.parse()
        .map_err(|err: fleetkeep_core::status::UnknownVariant| AppError::BadRequest(err.to_string()))
}

/// POST /validate/{entity}
pub async fn validate_new(
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input = validate_create(entity_kind(&entity)?, &body)?;
    Ok(Json(DataResponse { data: input }))
}

/// PATCH /validate/{entity}
pub async fn validate_update(
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let patch = validate_partial_update(entity_kind(&entity)?, &body)?;
    Ok(Json(DataResponse { data: patch }))
}
