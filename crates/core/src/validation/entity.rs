//! Entity registry: resolve an entity name and dispatch to its schema.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::assets::{NewAsset, NewAssignment};
use super::commerce::{NewOrder, NewProduct, NewReturnRequest};
use super::logistics::{NewIntegration, NewShipment};
use super::maintenance::{NewRepairService, NewServiceVendor};
use super::people::{NewCustomer, NewEmployee};
use super::procurement::{NewProcurementRequest, NewQuotation, NewSupplier};
use super::query::ListQuery;
use super::stock::{NewBufferStock, NewConsumption};
use super::{Schema, ValidationErrors};
use crate::status::define_closed_set;
use crate::types::Timestamp;

define_closed_set! {
    /// Every entity with a schema. Names resolve case- and
    /// separator-insensitively, so `buffer-stock` finds [`EntityKind::BufferStock`].
    EntityKind {
        Employee | "Holder",
        Asset,
        AssetAssignment | "Assignment",
        ServiceVendor | "Vendor",
        RepairService | "Maintenance" | "Service",
        Supplier,
        ProcurementRequest | "Procurement",
        Quotation,
        BufferStock,
        BufferConsumption | "Consumption",
        Shipment,
        Integration,
        Customer,
        Product,
        Order,
        ReturnRequest | "Return",
        ListQuery | "Query",
    }
}

macro_rules! entity_registry {
    ($( $kind:ident => $input:ty ),+ $(,)?) => {
        /// A validated create payload for any entity.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "entity", content = "value")]
        pub enum EntityInput {
            $( $kind($input) ),+
        }

        /// A validated partial update for any entity.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "entity", content = "value")]
        pub enum EntityPatch {
            $( $kind(<$input as Schema>::Patch) ),+
        }

        impl EntityInput {
            pub fn kind(&self) -> EntityKind {
                match self {
                    $( Self::$kind(_) => EntityKind::$kind ),+
                }
            }
        }

        impl EntityPatch {
            pub fn kind(&self) -> EntityKind {
                match self {
                    $( Self::$kind(_) => EntityKind::$kind ),+
                }
            }
        }

        /// Validate a full record of `kind` against an explicit instant.
        pub fn validate_create_at(
            kind: EntityKind,
            raw: &Value,
            now: Timestamp,
        ) -> Result<EntityInput, ValidationErrors> {
            match kind {
                $( EntityKind::$kind => <$input as Schema>::create_at(raw, now).map(EntityInput::$kind) ),+
            }
        }

        /// Validate a partial update of `kind` against an explicit instant.
        pub fn validate_partial_update_at(
            kind: EntityKind,
            raw: &Value,
            now: Timestamp,
        ) -> Result<EntityPatch, ValidationErrors> {
            match kind {
                $( EntityKind::$kind => <$input as Schema>::patch_at(raw, now).map(EntityPatch::$kind) ),+
            }
        }
    };
}

entity_registry! {
    Employee => NewEmployee,
    Asset => NewAsset,
    AssetAssignment => NewAssignment,
    ServiceVendor => NewServiceVendor,
    RepairService => NewRepairService,
    Supplier => NewSupplier,
    ProcurementRequest => NewProcurementRequest,
    Quotation => NewQuotation,
    BufferStock => NewBufferStock,
    BufferConsumption => NewConsumption,
    Shipment => NewShipment,
    Integration => NewIntegration,
    Customer => NewCustomer,
    Product => NewProduct,
    Order => NewOrder,
    ReturnRequest => NewReturnRequest,
    ListQuery => ListQuery,
}

pub fn validate_create(kind: EntityKind, raw: &Value) -> Result<EntityInput, ValidationErrors> {
    validate_create_at(kind, raw, Utc::now())
}

pub fn validate_partial_update(
    kind: EntityKind,
    raw: &Value,
) -> Result<EntityPatch, ValidationErrors> {
    validate_partial_update_at(kind, raw, Utc::now())
}
