//! Buffer stock, consumption and restocking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::stock::{NewBufferStock, NewConsumption, StockAdjustment};
use serde_json::Value;

use super::{find, validated, with_default, with_field};
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /buffer-stocks
pub async fn register_buffer_stock(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewBufferStock = validated(&body)?;
    let stock = state.engine().register_buffer_stock(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: stock })))
}

/// GET /buffer-stocks/{id}
pub async fn get_buffer_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stock = find(&state, "BufferStock", id, |repo, id| repo.buffer_stock(id))?;
    Ok(Json(DataResponse { data: stock }))
}

/// POST /buffer-stocks/{id}/consume
///
/// `requestedBy` defaults to the caller.
pub async fn consume_stock(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let body = with_default(with_field(body, "bufferStockId", id), "requestedBy", actor.user_id);
    let input: NewConsumption = validated(&body)?;
    let consumption = state.engine().consume_stock(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: consumption })))
}

/// POST /buffer-stocks/{id}/restock
pub async fn restock(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let adjustment: StockAdjustment = validated(&body)?;
    let stock = state.engine().restock(&actor, id, adjustment)?;
    Ok(Json(DataResponse { data: stock }))
}

/// POST /consumptions/{id}/approve
pub async fn approve_consumption(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let consumption = state.engine().approve_consumption(&actor, id)?;
    Ok(Json(DataResponse { data: consumption }))
}

/// POST /consumptions/{id}/complete
pub async fn complete_consumption(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let consumption = state.engine().complete_consumption(&actor, id)?;
    Ok(Json(DataResponse { data: consumption }))
}
