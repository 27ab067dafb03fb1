//! Customer orders and return requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::commerce::{NewOrder, NewReturnRequest, ReturnStatusChange};
use serde_json::Value;

use super::{validated, with_field};
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /customers/{id}/orders
pub async fn place_order(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(customer_id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewOrder = validated(&with_field(body, "customerId", customer_id))?;
    let order = state.engine().place_order(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// POST /return-requests
pub async fn open_return_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewReturnRequest = validated(&body)?;
    let request = state.engine().open_return_request(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// PUT /return-requests/{id}/status
pub async fn set_return_status(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let change: ReturnStatusChange = validated(&body)?;
    let request = state.engine().set_return_status(&actor, id, change.return_status)?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /return-requests/{id}/label
pub async fn mark_label_generated(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.engine().mark_label_generated(&actor, id)?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /return-requests/{id}/confirm
pub async fn confirm_final_status(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.engine().confirm_final_status(&actor, id)?;
    Ok(Json(DataResponse { data: request }))
}
