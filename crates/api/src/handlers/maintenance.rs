//! Repair service lifecycle.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::maintenance::{NewRepairService, ServiceCompletion};
use serde_json::Value;

use super::{optional_body, validated};
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /repair-services
pub async fn schedule_service(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewRepairService = validated(&body)?;
    let service = state.engine().schedule_service(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// POST /repair-services/{id}/start
pub async fn start_service(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = state.engine().start_service(&actor, id)?;
    Ok(Json(DataResponse { data: service }))
}

/// POST /repair-services/{id}/complete
///
/// The body is optional; `completionDate` defaults to now.
pub async fn complete_service(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    body: Option<Json<Value>>,
) -> AppResult<impl IntoResponse> {
    let completion: ServiceCompletion = validated(&optional_body(body))?;
    let service = state.engine().complete_service(&actor, id, completion)?;
    Ok(Json(DataResponse { data: service }))
}
