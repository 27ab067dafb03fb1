//! Read-only rule checks.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use fleetkeep_core::rules::{check_rule, RuleCheck};
use fleetkeep_core::store::DataAccess;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCheckResponse {
    #[serde(flatten)]
    pub rule: RuleCheck,
    pub passed: bool,
}

/// POST /rules/check
///
/// Passes with 200. A malformed check is a 422 with field violations. A
/// failing rule answers with the same 409/404 a real transition would.
pub async fn check(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let rule = RuleCheck::from_json(&body)?;
    state.store.atomically(|repo| check_rule(&rule, repo))?;
    Ok(Json(DataResponse {
        data: RuleCheckResponse { rule, passed: true },
    }))
}
