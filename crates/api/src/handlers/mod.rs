pub mod assets;
pub mod commerce;
pub mod events;
pub mod maintenance;
pub mod people;
pub mod procurement;
pub mod rules;
pub mod stock;
pub mod validation;

use axum::Json;
use fleetkeep_core::error::{RuleError, StoreError};
use fleetkeep_core::store::{DataAccess, Repository};
use fleetkeep_core::types::DbId;
use fleetkeep_core::validation::Schema;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// Run the schema for `S` over a request body.
pub(crate) fn validated<S: Schema>(body: &Value) -> AppResult<S> {
    Ok(S::create(body)?)
}

/// The body of an endpoint whose fields are all optional. A missing body
/// reads as `{}`.
pub(crate) fn optional_body(body: Option<Json<Value>>) -> Value {
    body.map(|Json(value)| value)
        .unwrap_or_else(|| Value::Object(Default::default()))
}

/// Overwrite `field` with a value taken from the path.
///
/// Non-object bodies are left alone so the schema reports them.
pub(crate) fn with_field(mut body: Value, field: &str, value: impl Into<Value>) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.insert(field.to_string(), value.into());
    }
    body
}

/// Fill `field` only when the caller left it out.
pub(crate) fn with_default(mut body: Value, field: &str, value: impl Into<Value>) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.entry(field).or_insert_with(|| value.into());
    }
    body
}

/// Load one record, or `NotFound`.
pub(crate) fn find<T>(
    state: &AppState,
    entity: &'static str,
    id: DbId,
    load: impl FnOnce(&dyn Repository, DbId) -> Result<Option<T>, StoreError>,
) -> AppResult<T> {
    let found = state.store.atomically(|repo| Ok(load(repo, id)?))?;
    Ok(found.ok_or(RuleError::not_found(entity, id))?)
}
