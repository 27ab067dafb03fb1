//! Schema validation layer.
//!
//! Pure, stateless checks of one candidate record: required fields, closed
//! enumerations, numeric bounds, string lengths, formats and cross-field
//! ordering within the record. Every violation is collected in one pass.

pub mod assets;
pub mod commerce;
pub mod entity;
pub mod logistics;
pub mod maintenance;
pub mod people;
pub mod procurement;
pub mod query;
pub mod reader;
pub mod stock;
pub mod violation;

use chrono::Utc;
use serde_json::{Map, Value};

pub use entity::{
    validate_create, validate_create_at, validate_partial_update, validate_partial_update_at,
    EntityInput, EntityKind, EntityPatch,
};
pub use reader::{FieldReader, Mode, Need, NumberBound, When};
pub use violation::{FieldViolation, ValidationErrors, ViolationKind};

use crate::types::Timestamp;

/// A typed input with a create form (`Self`) and a partial update form.
///
/// Implementors read every field once in [`Schema::read`], honouring the
/// reader's [`Mode`] for required-ness, and run their cross-field checks
/// there so create and patch share one definition.
pub trait Schema: Sized {
    type Patch;

    /// Read all fields into the partial form, recording violations.
    fn read(r: &mut FieldReader<'_>) -> Self::Patch;

    /// Promote a partial form to the full input; `None` if a required field
    /// is missing.
    fn complete(patch: Self::Patch) -> Option<Self>;

    fn create(raw: &Value) -> Result<Self, ValidationErrors> {
        Self::create_at(raw, Utc::now())
    }

    fn create_at(raw: &Value, now: Timestamp) -> Result<Self, ValidationErrors> {
        let data = root_object(raw)?;
        let mut reader = FieldReader::new(data, Mode::Create, now);
        let patch = Self::read(&mut reader);
        let value = Self::complete(patch);
        reader.finish(value)
    }

    fn patch(raw: &Value) -> Result<Self::Patch, ValidationErrors> {
        Self::patch_at(raw, Utc::now())
    }

    fn patch_at(raw: &Value, now: Timestamp) -> Result<Self::Patch, ValidationErrors> {
        let data = root_object(raw)?;
        let mut reader = FieldReader::new(data, Mode::Patch, now);
        let patch = Self::read(&mut reader);
        reader.finish(Some(patch))
    }
}

pub(crate) fn root_object(raw: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    raw.as_object()
        .ok_or_else(|| ValidationErrors::single("", ViolationKind::Type, "must be a JSON object"))
}

/// Report `later` when it falls before `earlier`.
pub(crate) fn ensure_not_before(
    r: &mut FieldReader<'_>,
    earlier: (&str, Option<Timestamp>),
    later: (&str, Option<Timestamp>),
) {
    if let (Some(start), Some(end)) = (earlier.1, later.1) {
        if end < start {
            r.reject(
                later.0,
                ViolationKind::CrossField,
                format!("must not be before {}", earlier.0),
            );
        }
    }
}
