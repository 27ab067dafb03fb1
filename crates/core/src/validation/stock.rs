//! Buffer stock and consumption schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need};
use super::{Schema, ViolationKind};
use crate::status::ConsumptionStatus;
use crate::types::DbId;

pub const MAX_ITEM_NAME_LEN: usize = 200;
pub const MAX_ITEM_TYPE_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MAX_PURPOSE_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBufferStock {
    pub item_name: String,
    pub item_type: String,
    pub quantity_available: i64,
    pub minimum_stock_level: i64,
    pub maximum_stock_level: i64,
    pub auto_reorder_enabled: Option<bool>,
    pub managed_by: DbId,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferStockPatch {
    pub item_name: Option<String>,
    pub item_type: Option<String>,
    pub quantity_available: Option<i64>,
    pub minimum_stock_level: Option<i64>,
    pub maximum_stock_level: Option<i64>,
    pub auto_reorder_enabled: Option<bool>,
    pub managed_by: Option<DbId>,
    pub location: Option<String>,
}

impl Schema for NewBufferStock {
    type Patch = BufferStockPatch;

    fn read(r: &mut FieldReader<'_>) -> BufferStockPatch {
        let patch = BufferStockPatch {
            item_name: r.text("itemName", MAX_ITEM_NAME_LEN, Need::Required),
            item_type: r.text("itemType", MAX_ITEM_TYPE_LEN, Need::Required),
            quantity_available: r.integer("quantityAvailable", 0, i64::MAX, Need::Required),
            minimum_stock_level: r.integer("minimumStockLevel", 1, i64::MAX, Need::Required),
            maximum_stock_level: r.integer("maximumStockLevel", 1, i64::MAX, Need::Required),
            auto_reorder_enabled: r.flag("autoReorderEnabled"),
            managed_by: r.id("managedBy", Need::Required),
            location: r.text("location", MAX_LOCATION_LEN, Need::Optional),
        };
        check_levels(r, &patch);
        patch
    }

    fn complete(p: BufferStockPatch) -> Option<Self> {
        Some(Self {
            item_name: p.item_name?,
            item_type: p.item_type?,
            quantity_available: p.quantity_available?,
            minimum_stock_level: p.minimum_stock_level?,
            maximum_stock_level: p.maximum_stock_level?,
            auto_reorder_enabled: p.auto_reorder_enabled,
            managed_by: p.managed_by?,
            location: p.location,
        })
    }
}

/// `maximum > minimum` and `available <= maximum`, each reported on its own.
fn check_levels(r: &mut FieldReader<'_>, patch: &BufferStockPatch) {
    if let (Some(min), Some(max)) = (patch.minimum_stock_level, patch.maximum_stock_level) {
        if max <= min {
            r.reject(
                "maximumStockLevel",
                ViolationKind::CrossField,
                "must be greater than minimumStockLevel",
            );
        }
    }
    if let (Some(available), Some(max)) = (patch.quantity_available, patch.maximum_stock_level) {
        if available > max {
            r.reject(
                "quantityAvailable",
                ViolationKind::CrossField,
                "must not exceed maximumStockLevel",
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsumption {
    pub buffer_stock_id: DbId,
    pub quantity_consumed: i64,
    pub requested_by: DbId,
    pub purpose: Option<String>,
    pub status: Option<ConsumptionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionPatch {
    pub buffer_stock_id: Option<DbId>,
    pub quantity_consumed: Option<i64>,
    pub requested_by: Option<DbId>,
    pub purpose: Option<String>,
    pub status: Option<ConsumptionStatus>,
}

impl Schema for NewConsumption {
    type Patch = ConsumptionPatch;

    fn read(r: &mut FieldReader<'_>) -> ConsumptionPatch {
        ConsumptionPatch {
            buffer_stock_id: r.id("bufferStockId", Need::Required),
            quantity_consumed: r.integer("quantityConsumed", 1, i64::MAX, Need::Required),
            requested_by: r.id("requestedBy", Need::Required),
            purpose: r.text("purpose", MAX_PURPOSE_LEN, Need::Optional),
            status: r.choice("status", Need::Optional),
        }
    }

    fn complete(p: ConsumptionPatch) -> Option<Self> {
        Some(Self {
            buffer_stock_id: p.buffer_stock_id?,
            quantity_consumed: p.quantity_consumed?,
            requested_by: p.requested_by?,
            purpose: p.purpose,
            status: p.status,
        })
    }
}

/// Body of a restock: the new on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub quantity_available: i64,
}

impl Schema for StockAdjustment {
    type Patch = Option<i64>;

    fn read(r: &mut FieldReader<'_>) -> Option<i64> {
        r.integer("quantityAvailable", 0, i64::MAX, Need::Required)
    }

    fn complete(quantity: Option<i64>) -> Option<Self> {
        Some(Self {
            quantity_available: quantity?,
        })
    }
}
