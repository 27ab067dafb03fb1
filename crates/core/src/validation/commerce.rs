//! Product, order and return request schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Mode, Need, NumberBound};
use super::{Schema, ViolationKind};
use crate::status::{OrderStatus, ProductStatus, ReturnStatus};
use crate::types::DbId;

pub const MAX_PRODUCT_NAME_LEN: usize = 200;
pub const MAX_SKU_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_SHIPPING_ADDRESS_LEN: usize = 500;
pub const MAX_REASON_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub sku: String,
    pub price: f64,
    pub stock_quantity: Option<i64>,
    pub status: Option<ProductStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub status: Option<ProductStatus>,
    pub description: Option<String>,
}

impl Schema for NewProduct {
    type Patch = ProductPatch;

    fn read(r: &mut FieldReader<'_>) -> ProductPatch {
        ProductPatch {
            product_name: r.text("productName", MAX_PRODUCT_NAME_LEN, Need::Required),
            sku: r.text("sku", MAX_SKU_LEN, Need::Required),
            price: r.number("price", NumberBound::Positive, Need::Required),
            stock_quantity: r.integer("stockQuantity", 0, i64::MAX, Need::Optional),
            status: r.choice("status", Need::Optional),
            description: r.text("description", MAX_DESCRIPTION_LEN, Need::Optional),
        }
    }

    fn complete(p: ProductPatch) -> Option<Self> {
        Some(Self {
            product_name: p.product_name?,
            sku: p.sku?,
            price: p.price?,
            stock_quantity: p.stock_quantity,
            status: p.status,
            description: p.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: DbId,
    pub quantity: i64,
    pub unit_price: f64,
}

impl OrderItemInput {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let product_id = r.id("productId", Need::Required);
        let quantity = r.integer("quantity", 1, i64::MAX, Need::Required);
        let unit_price = r.number("unitPrice", NumberBound::Positive, Need::Required);
        Some(Self {
            product_id: product_id?,
            quantity: quantity?,
            unit_price: unit_price?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: DbId,
    pub items: Vec<OrderItemInput>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub customer_id: Option<DbId>,
    pub items: Option<Vec<OrderItemInput>>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
}

impl Schema for NewOrder {
    type Patch = OrderPatch;

    fn read(r: &mut FieldReader<'_>) -> OrderPatch {
        OrderPatch {
            customer_id: r.id("customerId", Need::Required),
            items: r.list("items", Need::Required, OrderItemInput::read),
            status: r.choice("status", Need::Optional),
            shipping_address: r.text("shippingAddress", MAX_SHIPPING_ADDRESS_LEN, Need::Optional),
        }
    }

    fn complete(p: OrderPatch) -> Option<Self> {
        Some(Self {
            customer_id: p.customer_id?,
            items: p.items?,
            status: p.status,
            shipping_address: p.shipping_address,
        })
    }
}

impl NewOrder {
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.unit_price * item.quantity as f64)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReturnRequest {
    pub holder_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub order_id: Option<DbId>,
    pub asset_id: Option<DbId>,
    pub reason: String,
    pub return_status: Option<ReturnStatus>,
    pub prepaid_label_generated: Option<bool>,
    pub final_status_confirmed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestPatch {
    pub holder_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub order_id: Option<DbId>,
    pub asset_id: Option<DbId>,
    pub reason: Option<String>,
    pub return_status: Option<ReturnStatus>,
    pub prepaid_label_generated: Option<bool>,
    pub final_status_confirmed: Option<bool>,
}

impl Schema for NewReturnRequest {
    type Patch = ReturnRequestPatch;

    fn read(r: &mut FieldReader<'_>) -> ReturnRequestPatch {
        let patch = ReturnRequestPatch {
            holder_id: r.id("holderId", Need::Optional),
            customer_id: r.id("customerId", Need::Optional),
            order_id: r.id("orderId", Need::Optional),
            asset_id: r.id("assetId", Need::Optional),
            reason: r.text("reason", MAX_REASON_LEN, Need::Required),
            return_status: r.choice("returnStatus", Need::Optional),
            prepaid_label_generated: r.flag("prepaidLabelGenerated"),
            final_status_confirmed: r.flag("finalStatusConfirmed"),
        };
        check_single_requester(r, &patch);
        patch
    }

    fn complete(p: ReturnRequestPatch) -> Option<Self> {
        Some(Self {
            holder_id: p.holder_id,
            customer_id: p.customer_id,
            order_id: p.order_id,
            asset_id: p.asset_id,
            reason: p.reason?,
            return_status: p.return_status,
            prepaid_label_generated: p.prepaid_label_generated,
            final_status_confirmed: p.final_status_confirmed,
        })
    }
}

/// A return is raised by exactly one of a holder or a customer.
///
/// A patch may carry neither, but never both.
fn check_single_requester(r: &mut FieldReader<'_>, patch: &ReturnRequestPatch) {
    if r.has_violation("holderId") || r.has_violation("customerId") {
        return;
    }
    let invalid = match (patch.holder_id, patch.customer_id) {
        (Some(_), Some(_)) => true,
        (None, None) => r.mode() == Mode::Create,
        _ => false,
    };
    if invalid {
        r.reject(
            "holderId",
            ViolationKind::CrossField,
            "exactly one of holderId or customerId must be set",
        );
    }
}

/// Body of a return status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatusChange {
    pub return_status: ReturnStatus,
}

impl Schema for ReturnStatusChange {
    type Patch = Option<ReturnStatus>;

    fn read(r: &mut FieldReader<'_>) -> Option<ReturnStatus> {
        r.choice("returnStatus", Need::Required)
    }

    fn complete(status: Option<ReturnStatus>) -> Option<Self> {
        Some(Self {
            return_status: status?,
        })
    }
}
