//! Persisted domain records.
//!
//! Records are built from validated inputs with `id = 0`; the Data Access
//! collaborator assigns the real id on insert.

use serde::{Deserialize, Serialize};

use crate::status::{
    AssetStatus, AssignmentStatus, ConsumptionStatus, OrderStatus, RequestStatus, RequestType,
    ReturnStatus, Role, ServiceStatus, ServiceType,
};
use crate::types::{DbId, Timestamp};
use crate::validation::assets::{NewAsset, NewAssignment};
use crate::validation::commerce::{NewOrder, NewReturnRequest, OrderItemInput};
use crate::validation::maintenance::{NewRepairService, NewServiceVendor};
use crate::validation::people::{NewCustomer, NewEmployee};
use crate::validation::procurement::{
    NewProcurementRequest, NewQuotation, NewSupplier, MAX_REQUEST_QUANTITY,
};
use crate::validation::stock::{NewBufferStock, NewConsumption};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub role: Role,
    pub hire_date: Timestamp,
    pub is_active: bool,
}

impl Employee {
    pub fn from_input(input: NewEmployee) -> Self {
        Self {
            id: 0,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            department: input.department,
            position: input.position,
            role: input.role.unwrap_or(Role::Employee),
            hire_date: input.hire_date,
            is_active: input.is_active.unwrap_or(true),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: DbId,
    pub asset_name: String,
    pub asset_type: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub barcode: Option<String>,
    pub status: AssetStatus,
    pub location: Option<String>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<Timestamp>,
    pub warranty_expiry: Option<Timestamp>,
    pub owner_holder_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
}

impl Asset {
    pub fn from_input(input: NewAsset) -> Self {
        Self {
            id: 0,
            asset_name: input.asset_name,
            asset_type: input.asset_type,
            model: input.model,
            serial_number: input.serial_number,
            barcode: input.barcode,
            status: input.status.unwrap_or(AssetStatus::Available),
            location: input.location,
            purchase_price: input.purchase_price,
            purchase_date: input.purchase_date,
            warranty_expiry: input.warranty_expiry,
            owner_holder_id: input.owner_holder_id,
            supplier_id: input.supplier_id,
        }
    }

    /// Whether the warranty still covers `at`.
    pub fn under_warranty(&self, at: Timestamp) -> bool {
        self.warranty_expiry.is_some_and(|expiry| at < expiry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: DbId,
    pub asset_id: DbId,
    pub employee_id: DbId,
    pub assigned_date: Timestamp,
    pub expected_return_date: Option<Timestamp>,
    pub return_date: Option<Timestamp>,
    pub status: AssignmentStatus,
    pub acknowledged: bool,
    pub notes: Option<String>,
}

impl Assignment {
    /// A new Active assignment; the assigned date defaults to `now`.
    pub fn from_input(input: NewAssignment, now: Timestamp) -> Self {
        Self {
            id: 0,
            asset_id: input.asset_id,
            employee_id: input.employee_id,
            assigned_date: input.assigned_date.unwrap_or(now),
            expected_return_date: input.expected_return_date,
            return_date: None,
            status: AssignmentStatus::Active,
            acknowledged: input.acknowledged.unwrap_or(false),
            notes: input.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVendor {
    pub id: DbId,
    pub vendor_name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub rating: Option<f64>,
}

impl ServiceVendor {
    pub fn from_input(input: NewServiceVendor) -> Self {
        Self {
            id: 0,
            vendor_name: input.vendor_name,
            contact_email: input.contact_email,
            phone: input.phone,
            specialization: input.specialization,
            rating: input.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: DbId,
    pub supplier_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
}

impl Supplier {
    pub fn from_input(input: NewSupplier) -> Self {
        Self {
            id: 0,
            supplier_name: input.supplier_name,
            contact_name: input.contact_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            rating: input.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairService {
    pub id: DbId,
    pub asset_id: DbId,
    pub vendor_id: DbId,
    pub service_type: ServiceType,
    pub description: String,
    pub resolution: Option<String>,
    pub cost: Option<f64>,
    pub warranty_covered: bool,
    pub status: ServiceStatus,
    pub service_date: Timestamp,
    pub completion_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
}

impl RepairService {
    /// Scheduled unless the input asks for InProgress; the service date
    /// defaults to `now`.
    pub fn from_input(input: NewRepairService, now: Timestamp) -> Self {
        let status = match input.status {
            Some(ServiceStatus::InProgress) => ServiceStatus::InProgress,
            _ => ServiceStatus::Scheduled,
        };
        Self {
            id: 0,
            asset_id: input.asset_id,
            vendor_id: input.vendor_id,
            service_type: input.service_type,
            description: input.description,
            resolution: input.resolution,
            cost: input.cost,
            warranty_covered: input.warranty_covered.unwrap_or(false),
            status,
            service_date: input.service_date.unwrap_or(now),
            completion_date: None,
            reminder_date: input.reminder_date,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status != ServiceStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferStock {
    pub id: DbId,
    pub item_name: String,
    pub item_type: String,
    pub quantity_available: i64,
    pub minimum_stock_level: i64,
    pub maximum_stock_level: i64,
    pub auto_reorder_enabled: bool,
    pub managed_by: DbId,
    pub location: Option<String>,
}

impl BufferStock {
    pub fn from_input(input: NewBufferStock) -> Self {
        Self {
            id: 0,
            item_name: input.item_name,
            item_type: input.item_type,
            quantity_available: input.quantity_available,
            minimum_stock_level: input.minimum_stock_level,
            maximum_stock_level: input.maximum_stock_level,
            auto_reorder_enabled: input.auto_reorder_enabled.unwrap_or(false),
            managed_by: input.managed_by,
            location: input.location,
        }
    }

    /// At or below the reorder floor.
    pub fn is_low(&self) -> bool {
        self.quantity_available <= self.minimum_stock_level
    }

    /// Quantity that refills the stock to its maximum, capped at the
    /// largest request a procurement request may carry.
    pub fn refill_quantity(&self) -> i64 {
        (self.maximum_stock_level - self.quantity_available).clamp(1, MAX_REQUEST_QUANTITY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferConsumption {
    pub id: DbId,
    pub buffer_stock_id: DbId,
    pub quantity_consumed: i64,
    pub requested_by: DbId,
    pub approved_by: Option<DbId>,
    pub purpose: Option<String>,
    pub status: ConsumptionStatus,
    pub consumed_at: Timestamp,
}

impl BufferConsumption {
    pub fn from_input(input: NewConsumption, now: Timestamp) -> Self {
        Self {
            id: 0,
            buffer_stock_id: input.buffer_stock_id,
            quantity_consumed: input.quantity_consumed,
            requested_by: input.requested_by,
            approved_by: None,
            purpose: input.purpose,
            status: ConsumptionStatus::Pending,
            consumed_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementRequest {
    pub id: DbId,
    pub item_description: String,
    pub quantity: i64,
    pub request_type: RequestType,
    pub buffer_stock_id: Option<DbId>,
    pub requested_by: DbId,
    pub approved_by: Option<DbId>,
    pub estimated_cost: Option<f64>,
    pub justification: Option<String>,
    pub required_by: Option<Timestamp>,
    pub status: RequestStatus,
    pub auto_generated: bool,
    pub created_at: Timestamp,
}

impl ProcurementRequest {
    /// A Pending request raised by `requested_by`.
    pub fn from_input(input: NewProcurementRequest, requested_by: DbId, now: Timestamp) -> Self {
        Self {
            id: 0,
            item_description: input.item_description,
            quantity: input.quantity,
            request_type: input.request_type,
            buffer_stock_id: input.buffer_stock_id,
            requested_by,
            approved_by: None,
            estimated_cost: input.estimated_cost,
            justification: input.justification,
            required_by: input.required_by,
            status: RequestStatus::Pending,
            auto_generated: false,
            created_at: now,
        }
    }

    /// The automatic refill request for a stock that crossed its floor.
    pub fn reorder_for(stock: &BufferStock, now: Timestamp) -> Self {
        Self {
            id: 0,
            item_description: format!("Reorder {}", stock.item_name),
            quantity: stock.refill_quantity(),
            request_type: RequestType::BufferStock,
            buffer_stock_id: Some(stock.id),
            requested_by: stock.managed_by,
            approved_by: None,
            estimated_cost: None,
            justification: Some(format!(
                "Quantity {} is at or below minimum level {}",
                stock.quantity_available, stock.minimum_stock_level
            )),
            required_by: None,
            status: RequestStatus::Pending,
            auto_generated: true,
            created_at: now,
        }
    }

    /// Pending or Approved.
    pub fn is_open(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::Approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: DbId,
    pub supplier_id: DbId,
    pub request_id: DbId,
    pub item_description: String,
    pub quoted_price: f64,
    pub quantity: i64,
    pub valid_until: Option<Timestamp>,
    pub delivery_days: Option<i64>,
    pub notes: Option<String>,
    pub received_at: Timestamp,
}

impl Quotation {
    pub fn from_input(input: NewQuotation, now: Timestamp) -> Self {
        Self {
            id: 0,
            supplier_id: input.supplier_id,
            request_id: input.request_id,
            item_description: input.item_description,
            quoted_price: input.quoted_price,
            quantity: input.quantity,
            valid_until: input.valid_until,
            delivery_days: input.delivery_days,
            notes: input.notes,
            received_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
}

impl Customer {
    pub fn from_input(input: NewCustomer) -> Self {
        Self {
            id: 0,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            company: input.company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: DbId,
    pub quantity: i64,
    pub unit_price: f64,
}

impl From<OrderItemInput> for OrderItem {
    fn from(item: OrderItemInput) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    pub order_date: Timestamp,
}

impl Order {
    pub fn from_input(input: NewOrder, now: Timestamp) -> Self {
        let total_amount = input.total();
        Self {
            id: 0,
            customer_id: input.customer_id,
            items: input.items.into_iter().map(OrderItem::from).collect(),
            status: input.status.unwrap_or(OrderStatus::Pending),
            shipping_address: input.shipping_address,
            total_amount,
            order_date: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: DbId,
    pub holder_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub order_id: Option<DbId>,
    pub asset_id: Option<DbId>,
    pub reason: String,
    pub return_status: ReturnStatus,
    pub prepaid_label_generated: bool,
    pub final_status_confirmed: bool,
    pub requested_at: Timestamp,
}

impl ReturnRequest {
    pub fn from_input(input: NewReturnRequest, now: Timestamp) -> Self {
        Self {
            id: 0,
            holder_id: input.holder_id,
            customer_id: input.customer_id,
            order_id: input.order_id,
            asset_id: input.asset_id,
            reason: input.reason,
            return_status: ReturnStatus::Pending,
            prepaid_label_generated: input.prepaid_label_generated.unwrap_or(false),
            final_status_confirmed: input.final_status_confirmed.unwrap_or(false),
            requested_at: now,
        }
    }
}
