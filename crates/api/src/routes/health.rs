use std::collections::BTreeMap;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the store cannot be read.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Committed rows per table; empty when degraded.
    pub tables: BTreeMap<&'static str, usize>,
    /// Sequence number of the last published event.
    pub last_event: u64,
    pub event_subscribers: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, tables) = match state.store.row_counts() {
        Ok(counts) => ("ok", counts.into_iter().collect()),
        Err(err) => {
            tracing::error!(error = %err, "Store health check failed");
            ("degraded", BTreeMap::new())
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        tables,
        last_event: state.event_bus.last_sequence(),
        event_subscribers: state.event_bus.subscriber_count(),
    })
}

/// Mounted at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
