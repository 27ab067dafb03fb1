//! Recently published events.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_EVENT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub limit: Option<usize>,
    /// Only events with a higher sequence number.
    pub after: Option<u64>,
}

/// GET /events?limit=N&after=SEQ, newest first.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    Ok(Json(DataResponse {
        data: state.journal.after(params.after.unwrap_or(0), limit),
    }))
}
