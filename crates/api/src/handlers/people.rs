//! Employees, service vendors, suppliers and customers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::maintenance::NewServiceVendor;
use fleetkeep_core::validation::people::{NewCustomer, NewEmployee};
use fleetkeep_core::validation::procurement::NewSupplier;
use serde_json::Value;

use super::validated;
use crate::error::AppResult;
use crate::middleware::actor::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /employees
pub async fn register_employee(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewEmployee = validated(&body)?;
    let employee = state.engine().register_employee(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// POST /employees/{id}/deactivate
pub async fn deactivate_employee(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = state.engine().deactivate_employee(&actor, id)?;
    Ok(Json(DataResponse { data: employee }))
}

/// POST /vendors
pub async fn register_vendor(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewServiceVendor = validated(&body)?;
    let vendor = state.engine().register_vendor(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: vendor })))
}

/// POST /suppliers
pub async fn register_supplier(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewSupplier = validated(&body)?;
    let supplier = state.engine().register_supplier(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: supplier })))
}

/// POST /customers
pub async fn register_customer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: NewCustomer = validated(&body)?;
    let customer = state.engine().register_customer(&actor, input)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}
