//! Procurement requests and quotations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::procurement::{NewProcurementRequest, NewQuotation};
use serde_json::Value;

use super::validated;
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /procurement-requests
pub async fn submit_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewProcurementRequest = validated(&body)?;
    let request = state.engine().submit_request(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /procurement-requests/{id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.engine().approve_request(&actor, id)?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /procurement-requests/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.engine().reject_request(&actor, id)?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /procurement-requests/{id}/complete
pub async fn complete_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.engine().complete_request(&actor, id)?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /quotations
pub async fn record_quotation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewQuotation = validated(&body)?;
    let quotation = state.engine().record_quotation(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: quotation })))
}
