//! Assets and their assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::assets::{AssignmentReturn, NewAsset, NewAssignment};
use serde_json::Value;

use super::{find, optional_body, validated};
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /assets
pub async fn register_asset(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewAsset = validated(&body)?;
    let asset = state.engine().register_asset(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = find(&state, "Asset", id, |repo, id| repo.asset(id))?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /assets/{id}/dispose
pub async fn dispose_asset(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state.engine().dispose_asset(&actor, id)?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /assets/{id}/lost
pub async fn mark_asset_lost(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state.engine().mark_asset_lost(&actor, id)?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /assignments
pub async fn assign_asset(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewAssignment = validated(&body)?;
    let assignment = state.engine().assign_asset(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// POST /assignments/{id}/return
///
/// The body is optional; `returnDate` defaults to now.
pub async fn return_asset(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    body: Option<Json<Value>>,
) -> AppResult<impl IntoResponse> {
    let input: AssignmentReturn = validated(&optional_body(body))?;
    let assignment = state.engine().return_asset(&actor, id, input.return_date)?;
    Ok(Json(DataResponse { data: assignment }))
}
