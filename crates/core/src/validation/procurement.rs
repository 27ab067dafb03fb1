//! Supplier, procurement request and quotation schemas.

use serde::{Deserialize, Serialize};

use super::maintenance::RATING_BOUND;
use super::reader::{FieldReader, Mode, Need, NumberBound, When};
use super::{Schema, ViolationKind};
use crate::status::{RequestStatus, RequestType};
use crate::types::{DbId, Timestamp};

pub const MAX_SUPPLIER_NAME_LEN: usize = 200;
pub const MAX_CONTACT_NAME_LEN: usize = 100;
pub const MAX_ADDRESS_LEN: usize = 500;
pub const MAX_ITEM_DESCRIPTION_LEN: usize = 500;
pub const MAX_JUSTIFICATION_LEN: usize = 1000;
pub const MAX_REQUEST_QUANTITY: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub supplier_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    pub supplier_name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
}

impl Schema for NewSupplier {
    type Patch = SupplierPatch;

    fn read(r: &mut FieldReader<'_>) -> SupplierPatch {
        SupplierPatch {
            supplier_name: r.text("supplierName", MAX_SUPPLIER_NAME_LEN, Need::Required),
            contact_name: r.text("contactName", MAX_CONTACT_NAME_LEN, Need::Optional),
            email: r.email("email", Need::Optional),
            phone: r.phone("phone"),
            address: r.text("address", MAX_ADDRESS_LEN, Need::Optional),
            rating: r.number("rating", RATING_BOUND, Need::Optional),
        }
    }

    fn complete(p: SupplierPatch) -> Option<Self> {
        Some(Self {
            supplier_name: p.supplier_name?,
            contact_name: p.contact_name,
            email: p.email,
            phone: p.phone,
            address: p.address,
            rating: p.rating,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProcurementRequest {
    pub item_description: String,
    pub quantity: i64,
    pub request_type: RequestType,
    pub buffer_stock_id: Option<DbId>,
    pub requested_by: Option<DbId>,
    pub estimated_cost: Option<f64>,
    pub justification: Option<String>,
    pub required_by: Option<Timestamp>,
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementRequestPatch {
    pub item_description: Option<String>,
    pub quantity: Option<i64>,
    pub request_type: Option<RequestType>,
    pub buffer_stock_id: Option<DbId>,
    pub requested_by: Option<DbId>,
    pub estimated_cost: Option<f64>,
    pub justification: Option<String>,
    pub required_by: Option<Timestamp>,
    pub status: Option<RequestStatus>,
}

impl Schema for NewProcurementRequest {
    type Patch = ProcurementRequestPatch;

    fn read(r: &mut FieldReader<'_>) -> ProcurementRequestPatch {
        let patch = ProcurementRequestPatch {
            item_description: r.text("itemDescription", MAX_ITEM_DESCRIPTION_LEN, Need::Required),
            quantity: r.integer("quantity", 1, MAX_REQUEST_QUANTITY, Need::Required),
            request_type: r.choice("requestType", Need::Required),
            buffer_stock_id: r.id("bufferStockId", Need::Optional),
            requested_by: r.id("requestedBy", Need::Optional),
            estimated_cost: r.number("estimatedCost", NumberBound::Positive, Need::Optional),
            justification: r.text("justification", MAX_JUSTIFICATION_LEN, Need::Optional),
            required_by: r.date("requiredBy", When::Future, Need::Optional),
            status: r.choice("status", Need::Optional),
        };
        check_buffer_stock_reference(r, &patch);
        patch
    }

    fn complete(p: ProcurementRequestPatch) -> Option<Self> {
        Some(Self {
            item_description: p.item_description?,
            quantity: p.quantity?,
            request_type: p.request_type?,
            buffer_stock_id: p.buffer_stock_id,
            requested_by: p.requested_by,
            estimated_cost: p.estimated_cost,
            justification: p.justification,
            required_by: p.required_by,
            status: p.status,
        })
    }
}

/// `bufferStockId` is required iff `requestType` is `BufferStock`.
///
/// A patch that omits `requestType` cannot be judged and is left alone.
fn check_buffer_stock_reference(r: &mut FieldReader<'_>, patch: &ProcurementRequestPatch) {
    let Some(request_type) = patch.request_type else {
        return;
    };
    if r.has_violation("bufferStockId") {
        return;
    }
    match (request_type, patch.buffer_stock_id) {
        (RequestType::BufferStock, None) if r.mode() == Mode::Create => r.reject(
            "bufferStockId",
            ViolationKind::CrossField,
            "is required when requestType is BufferStock",
        ),
        (RequestType::BufferStock, _) => {}
        (_, Some(_)) => r.reject(
            "bufferStockId",
            ViolationKind::CrossField,
            "is only allowed when requestType is BufferStock",
        ),
        (_, None) => {}
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuotation {
    pub supplier_id: DbId,
    pub request_id: DbId,
    pub item_description: String,
    pub quoted_price: f64,
    pub quantity: i64,
    pub valid_until: Option<Timestamp>,
    pub delivery_days: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPatch {
    pub supplier_id: Option<DbId>,
    pub request_id: Option<DbId>,
    pub item_description: Option<String>,
    pub quoted_price: Option<f64>,
    pub quantity: Option<i64>,
    pub valid_until: Option<Timestamp>,
    pub delivery_days: Option<i64>,
    pub notes: Option<String>,
}

impl Schema for NewQuotation {
    type Patch = QuotationPatch;

    fn read(r: &mut FieldReader<'_>) -> QuotationPatch {
        QuotationPatch {
            supplier_id: r.id("supplierId", Need::Required),
            request_id: r.id("requestId", Need::Required),
            item_description: r.text("itemDescription", MAX_ITEM_DESCRIPTION_LEN, Need::Required),
            quoted_price: r.number("quotedPrice", NumberBound::Positive, Need::Required),
            quantity: r.integer("quantity", 1, i64::MAX, Need::Required),
            valid_until: r.date("validUntil", When::Future, Need::Optional),
            delivery_days: r.integer("deliveryDays", 0, i64::MAX, Need::Optional),
            notes: r.text("notes", MAX_JUSTIFICATION_LEN, Need::Optional),
        }
    }

    fn complete(p: QuotationPatch) -> Option<Self> {
        Some(Self {
            supplier_id: p.supplier_id?,
            request_id: p.request_id?,
            item_description: p.item_description?,
            quoted_price: p.quoted_price?,
            quantity: p.quantity?,
            valid_until: p.valid_until,
            delivery_days: p.delivery_days,
            notes: p.notes,
        })
    }
}
