//! Caller identity extractor.
//!
//! Authentication happens upstream; this service trusts the `x-actor-id`
//! header (a positive integer) and the optional `x-actor-role` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fleetkeep_core::rules::Actor;
use fleetkeep_core::status::Role;
use fleetkeep_core::types::DbId;

use crate::error::AppError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The caller of a mutating endpoint.
///
/// ```ignore
/// async fn my_handler(CurrentActor(actor): CurrentActor) -> AppResult<Json<()>> {
///     tracing::info!(actor = actor.user_id, role = %actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {ACTOR_ID_HEADER} header")))?;

        let user_id: DbId = raw_id
            .trim()
            .parse()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                AppError::BadRequest(format!("{ACTOR_ID_HEADER} must be a positive integer"))
            })?;

        let role = match parts.headers.get(ACTOR_ROLE_HEADER) {
            None => Role::Employee,
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| v.parse::<Role>().ok())
                .ok_or_else(|| AppError::BadRequest(format!("Unknown {ACTOR_ROLE_HEADER}")))?,
        };

        Ok(CurrentActor(Actor::new(user_id, role)))
    }
}
