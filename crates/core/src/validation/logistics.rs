//! Shipment and integration schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need, When};
use super::{ensure_not_before, Schema};
use crate::status::{DeliveryStatus, IntegrationStatus};
use crate::types::{DbId, Timestamp};

pub const MAX_CARRIER_LEN: usize = 100;
pub const MAX_TRACKING_LEN: usize = 100;
pub const MAX_DESTINATION_LEN: usize = 500;
pub const MAX_INTEGRATION_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    pub asset_id: DbId,
    pub carrier: String,
    pub tracking_number: String,
    pub delivery_status: Option<DeliveryStatus>,
    pub shipped_date: Option<Timestamp>,
    pub estimated_delivery: Option<Timestamp>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPatch {
    pub asset_id: Option<DbId>,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub delivery_status: Option<DeliveryStatus>,
    pub shipped_date: Option<Timestamp>,
    pub estimated_delivery: Option<Timestamp>,
    pub destination: Option<String>,
}

impl Schema for NewShipment {
    type Patch = ShipmentPatch;

    fn read(r: &mut FieldReader<'_>) -> ShipmentPatch {
        let patch = ShipmentPatch {
            asset_id: r.id("assetId", Need::Required),
            carrier: r.text("carrier", MAX_CARRIER_LEN, Need::Required),
            tracking_number: r.text("trackingNumber", MAX_TRACKING_LEN, Need::Required),
            delivery_status: r.choice("deliveryStatus", Need::Optional),
            shipped_date: r.date("shippedDate", When::Past, Need::Optional),
            estimated_delivery: r.date("estimatedDelivery", When::Any, Need::Optional),
            destination: r.text("destination", MAX_DESTINATION_LEN, Need::Optional),
        };
        ensure_not_before(
            r,
            ("shippedDate", patch.shipped_date),
            ("estimatedDelivery", patch.estimated_delivery),
        );
        patch
    }

    fn complete(p: ShipmentPatch) -> Option<Self> {
        Some(Self {
            asset_id: p.asset_id?,
            carrier: p.carrier?,
            tracking_number: p.tracking_number?,
            delivery_status: p.delivery_status,
            shipped_date: p.shipped_date,
            estimated_delivery: p.estimated_delivery,
            destination: p.destination,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIntegration {
    pub name: String,
    pub provider: String,
    pub status: Option<IntegrationStatus>,
    pub last_synced_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationPatch {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub status: Option<IntegrationStatus>,
    pub last_synced_at: Option<Timestamp>,
}

impl Schema for NewIntegration {
    type Patch = IntegrationPatch;

    fn read(r: &mut FieldReader<'_>) -> IntegrationPatch {
        IntegrationPatch {
            name: r.text("name", MAX_INTEGRATION_NAME_LEN, Need::Required),
            provider: r.text("provider", MAX_INTEGRATION_NAME_LEN, Need::Required),
            status: r.choice("status", Need::Optional),
            last_synced_at: r.date("lastSyncedAt", When::Past, Need::Optional),
        }
    }

    fn complete(p: IntegrationPatch) -> Option<Self> {
        Some(Self {
            name: p.name?,
            provider: p.provider?,
            status: p.status,
            last_synced_at: p.last_synced_at,
        })
    }
}
