//! Service vendor and repair service schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need, NumberBound, When};
use super::{ensure_not_before, Schema};
use crate::status::{ServiceStatus, ServiceType};
use crate::types::{DbId, Timestamp};

pub const MAX_VENDOR_NAME_LEN: usize = 200;
pub const MAX_SPECIALIZATION_LEN: usize = 200;
pub const MAX_SERVICE_TEXT_LEN: usize = 1000;

/// Ratings are on a closed one-to-five scale.
pub const RATING_BOUND: NumberBound = NumberBound::Between(1.0, 5.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceVendor {
    pub vendor_name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVendorPatch {
    pub vendor_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub rating: Option<f64>,
}

impl Schema for NewServiceVendor {
    type Patch = ServiceVendorPatch;

    fn read(r: &mut FieldReader<'_>) -> ServiceVendorPatch {
        ServiceVendorPatch {
            vendor_name: r.text("vendorName", MAX_VENDOR_NAME_LEN, Need::Required),
            contact_email: r.email("contactEmail", Need::Optional),
            phone: r.phone("phone"),
            specialization: r.text("specialization", MAX_SPECIALIZATION_LEN, Need::Optional),
            rating: r.number("rating", RATING_BOUND, Need::Optional),
        }
    }

    fn complete(p: ServiceVendorPatch) -> Option<Self> {
        Some(Self {
            vendor_name: p.vendor_name?,
            contact_email: p.contact_email,
            phone: p.phone,
            specialization: p.specialization,
            rating: p.rating,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRepairService {
    pub asset_id: DbId,
    pub vendor_id: DbId,
    pub service_type: ServiceType,
    pub description: String,
    pub service_date: Option<Timestamp>,
    pub completion_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    pub cost: Option<f64>,
    pub warranty_covered: Option<bool>,
    pub status: Option<ServiceStatus>,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairServicePatch {
    pub asset_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub service_type: Option<ServiceType>,
    pub description: Option<String>,
    pub service_date: Option<Timestamp>,
    pub completion_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    pub cost: Option<f64>,
    pub warranty_covered: Option<bool>,
    pub status: Option<ServiceStatus>,
    pub resolution: Option<String>,
}

impl Schema for NewRepairService {
    type Patch = RepairServicePatch;

    fn read(r: &mut FieldReader<'_>) -> RepairServicePatch {
        let patch = RepairServicePatch {
            asset_id: r.id("assetId", Need::Required),
            vendor_id: r.id("vendorId", Need::Required),
            service_type: r.choice("serviceType", Need::Required),
            description: r.text("description", MAX_SERVICE_TEXT_LEN, Need::Required),
            service_date: r.date("serviceDate", When::Any, Need::Optional),
            completion_date: r.date("completionDate", When::Any, Need::Optional),
            reminder_date: r.date("reminderDate", When::Future, Need::Optional),
            cost: r.number("cost", NumberBound::NonNegative, Need::Optional),
            warranty_covered: r.flag("warrantyCovered"),
            status: r.choice("status", Need::Optional),
            resolution: r.text("resolution", MAX_SERVICE_TEXT_LEN, Need::Optional),
        };
        ensure_not_before(
            r,
            ("serviceDate", patch.service_date),
            ("completionDate", patch.completion_date),
        );
        patch
    }

    fn complete(p: RepairServicePatch) -> Option<Self> {
        Some(Self {
            asset_id: p.asset_id?,
            vendor_id: p.vendor_id?,
            service_type: p.service_type?,
            description: p.description?,
            service_date: p.service_date,
            completion_date: p.completion_date,
            reminder_date: p.reminder_date,
            cost: p.cost,
            warranty_covered: p.warranty_covered,
            status: p.status,
            resolution: p.resolution,
        })
    }
}

/// Body of a service completion. Both fields are optional; the completion
/// date defaults to now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCompletion {
    pub completion_date: Option<Timestamp>,
    pub resolution: Option<String>,
}

impl Schema for ServiceCompletion {
    type Patch = ServiceCompletion;

    fn read(r: &mut FieldReader<'_>) -> ServiceCompletion {
        ServiceCompletion {
            completion_date: r.date("completionDate", When::Past, Need::Optional),
            resolution: r.text("resolution", MAX_SERVICE_TEXT_LEN, Need::Optional),
        }
    }

    fn complete(patch: ServiceCompletion) -> Option<Self> {
        Some(patch)
    }
}
