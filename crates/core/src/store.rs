//! Data Access collaborator.
//!
//! The core never owns storage. Rule operations read and write records
//! through a [`Repository`] handed to them by [`DataAccess::atomically`],
//! which makes everything done inside one closure a single all-or-nothing
//! unit.

use crate::error::{RuleError, StoreError};
use crate::model::{
    Asset, Assignment, BufferConsumption, BufferStock, Customer, Employee, Order,
    ProcurementRequest, Quotation, RepairService, ReturnRequest, ServiceVendor, Supplier,
};
use crate::types::DbId;

/// Record lookups and writes inside one unit of work.
///
/// `insert_*` assigns the id and returns the stored record. `save_*`
/// replaces an existing record by id.
pub trait Repository {
    fn employee(&self, id: DbId) -> Result<Option<Employee>, StoreError>;
    fn insert_employee(&mut self, employee: Employee) -> Result<Employee, StoreError>;
    fn save_employee(&mut self, employee: &Employee) -> Result<(), StoreError>;

    fn asset(&self, id: DbId) -> Result<Option<Asset>, StoreError>;
    fn insert_asset(&mut self, asset: Asset) -> Result<Asset, StoreError>;
    fn save_asset(&mut self, asset: &Asset) -> Result<(), StoreError>;

    fn assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError>;
    fn insert_assignment(&mut self, assignment: Assignment) -> Result<Assignment, StoreError>;
    fn save_assignment(&mut self, assignment: &Assignment) -> Result<(), StoreError>;
    /// Active assignments of one asset.
    fn active_assignments(&self, asset_id: DbId) -> Result<Vec<Assignment>, StoreError>;

    fn vendor(&self, id: DbId) -> Result<Option<ServiceVendor>, StoreError>;
    fn insert_vendor(&mut self, vendor: ServiceVendor) -> Result<ServiceVendor, StoreError>;

    fn supplier(&self, id: DbId) -> Result<Option<Supplier>, StoreError>;
    fn insert_supplier(&mut self, supplier: Supplier) -> Result<Supplier, StoreError>;

    fn repair_service(&self, id: DbId) -> Result<Option<RepairService>, StoreError>;
    fn insert_repair_service(&mut self, service: RepairService)
        -> Result<RepairService, StoreError>;
    fn save_repair_service(&mut self, service: &RepairService) -> Result<(), StoreError>;
    /// Scheduled or InProgress services of one asset.
    fn open_services(&self, asset_id: DbId) -> Result<Vec<RepairService>, StoreError>;

    fn buffer_stock(&self, id: DbId) -> Result<Option<BufferStock>, StoreError>;
    fn insert_buffer_stock(&mut self, stock: BufferStock) -> Result<BufferStock, StoreError>;
    fn save_buffer_stock(&mut self, stock: &BufferStock) -> Result<(), StoreError>;

    fn consumption(&self, id: DbId) -> Result<Option<BufferConsumption>, StoreError>;
    fn insert_consumption(
        &mut self,
        consumption: BufferConsumption,
    ) -> Result<BufferConsumption, StoreError>;
    fn save_consumption(&mut self, consumption: &BufferConsumption) -> Result<(), StoreError>;

    fn procurement_request(&self, id: DbId) -> Result<Option<ProcurementRequest>, StoreError>;
    fn insert_procurement_request(
        &mut self,
        request: ProcurementRequest,
    ) -> Result<ProcurementRequest, StoreError>;
    fn save_procurement_request(&mut self, request: &ProcurementRequest)
        -> Result<(), StoreError>;
    /// The open (Pending or Approved) auto-generated reorder for a stock.
    fn open_reorder(&self, stock_id: DbId) -> Result<Option<ProcurementRequest>, StoreError>;

    fn quotation(&self, id: DbId) -> Result<Option<Quotation>, StoreError>;
    fn insert_quotation(&mut self, quotation: Quotation) -> Result<Quotation, StoreError>;

    fn customer(&self, id: DbId) -> Result<Option<Customer>, StoreError>;
    fn insert_customer(&mut self, customer: Customer) -> Result<Customer, StoreError>;

    fn order(&self, id: DbId) -> Result<Option<Order>, StoreError>;
    fn insert_order(&mut self, order: Order) -> Result<Order, StoreError>;

    fn return_request(&self, id: DbId) -> Result<Option<ReturnRequest>, StoreError>;
    fn insert_return_request(&mut self, request: ReturnRequest)
        -> Result<ReturnRequest, StoreError>;
    fn save_return_request(&mut self, request: &ReturnRequest) -> Result<(), StoreError>;
}

/// Source of atomic units of work.
pub trait DataAccess: Send + Sync {
    /// Run `unit` against the store. Its writes become visible only if it
    /// returns `Ok`; on `Err` every write is discarded.
    fn atomically<T, F>(&self, unit: F) -> Result<T, RuleError>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T, RuleError>;
}
