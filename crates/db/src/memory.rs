//! In-memory Data Access implementation.
//!
//! [`MemoryStore`] keeps every table behind one mutex. A unit of work runs
//! against a working copy of the tables; the copy replaces the committed
//! state only when the unit returns `Ok`.

use std::sync::Mutex;

use fleetkeep_core::error::{RuleError, StoreError};
use fleetkeep_core::model::{
    Asset, Assignment, BufferConsumption, BufferStock, Customer, Employee, Order,
    ProcurementRequest, Quotation, RepairService, ReturnRequest, ServiceVendor, Supplier,
};
use fleetkeep_core::status::AssignmentStatus;
use fleetkeep_core::store::{DataAccess, Repository};
use fleetkeep_core::types::DbId;

use crate::table::Table;

/// Every table the core reads and writes.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub employees: Table<Employee>,
    pub assets: Table<Asset>,
    pub assignments: Table<Assignment>,
    pub vendors: Table<ServiceVendor>,
    pub suppliers: Table<Supplier>,
    pub repair_services: Table<RepairService>,
    pub buffer_stocks: Table<BufferStock>,
    pub consumptions: Table<BufferConsumption>,
    pub procurement_requests: Table<ProcurementRequest>,
    pub quotations: Table<Quotation>,
    pub customers: Table<Customer>,
    pub orders: Table<Order>,
    pub return_requests: Table<ReturnRequest>,
}

impl Repository for Tables {
    fn employee(&self, id: DbId) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.get(id))
    }

    fn insert_employee(&mut self, employee: Employee) -> Result<Employee, StoreError> {
        Ok(self.employees.insert(employee))
    }

    fn save_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        self.employees.save(employee)
    }

    fn asset(&self, id: DbId) -> Result<Option<Asset>, StoreError> {
        Ok(self.assets.get(id))
    }

    fn insert_asset(&mut self, asset: Asset) -> Result<Asset, StoreError> {
        Ok(self.assets.insert(asset))
    }

    fn save_asset(&mut self, asset: &Asset) -> Result<(), StoreError> {
        self.assets.save(asset)
    }

    fn assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError> {
        Ok(self.assignments.get(id))
    }

    fn insert_assignment(&mut self, assignment: Assignment) -> Result<Assignment, StoreError> {
        Ok(self.assignments.insert(assignment))
    }

    fn save_assignment(&mut self, assignment: &Assignment) -> Result<(), StoreError> {
        self.assignments.save(assignment)
    }

    fn active_assignments(&self, asset_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.asset_id == asset_id && a.status == AssignmentStatus::Active)
            .cloned()
            .collect())
    }

    fn vendor(&self, id: DbId) -> Result<Option<ServiceVendor>, StoreError> {
        Ok(self.vendors.get(id))
    }

    fn insert_vendor(&mut self, vendor: ServiceVendor) -> Result<ServiceVendor, StoreError> {
        Ok(self.vendors.insert(vendor))
    }

    fn supplier(&self, id: DbId) -> Result<Option<Supplier>, StoreError> {
        Ok(self.suppliers.get(id))
    }

    fn insert_supplier(&mut self, supplier: Supplier) -> Result<Supplier, StoreError> {
        Ok(self.suppliers.insert(supplier))
    }

    fn repair_service(&self, id: DbId) -> Result<Option<RepairService>, StoreError> {
        Ok(self.repair_services.get(id))
    }

    fn insert_repair_service(
        &mut self,
        service: RepairService,
    ) -> Result<RepairService, StoreError> {
        Ok(self.repair_services.insert(service))
    }

    fn save_repair_service(&mut self, service: &RepairService) -> Result<(), StoreError> {
        self.repair_services.save(service)
    }

    fn open_services(&self, asset_id: DbId) -> Result<Vec<RepairService>, StoreError> {
        Ok(self
            .repair_services
            .iter()
            .filter(|s| s.asset_id == asset_id && s.is_open())
            .cloned()
            .collect())
    }

    fn buffer_stock(&self, id: DbId) -> Result<Option<BufferStock>, StoreError> {
        Ok(self.buffer_stocks.get(id))
    }

    fn insert_buffer_stock(&mut self, stock: BufferStock) -> Result<BufferStock, StoreError> {
        Ok(self.buffer_stocks.insert(stock))
    }

    fn save_buffer_stock(&mut self, stock: &BufferStock) -> Result<(), StoreError> {
        self.buffer_stocks.save(stock)
    }

    fn consumption(&self, id: DbId) -> Result<Option<BufferConsumption>, StoreError> {
        Ok(self.consumptions.get(id))
    }

    fn insert_consumption(
        &mut self,
        consumption: BufferConsumption,
    ) -> Result<BufferConsumption, StoreError> {
        Ok(self.consumptions.insert(consumption))
    }

    fn save_consumption(&mut self, consumption: &BufferConsumption) -> Result<(), StoreError> {
        self.consumptions.save(consumption)
    }

    fn procurement_request(&self, id: DbId) -> Result<Option<ProcurementRequest>, StoreError> {
        Ok(self.procurement_requests.get(id))
    }

    fn insert_procurement_request(
        &mut self,
        request: ProcurementRequest,
    ) -> Result<ProcurementRequest, StoreError> {
        Ok(self.procurement_requests.insert(request))
    }

    fn save_procurement_request(
        &mut self,
        request: &ProcurementRequest,
    ) -> Result<(), StoreError> {
        self.procurement_requests.save(request)
    }

    fn open_reorder(&self, stock_id: DbId) -> Result<Option<ProcurementRequest>, StoreError> {
        Ok(self
            .procurement_requests
            .iter()
            .find(|r| r.auto_generated && r.buffer_stock_id == Some(stock_id) && r.is_open())
            .cloned())
    }

    fn quotation(&self, id: DbId) -> Result<Option<Quotation>, StoreError> {
        Ok(self.quotations.get(id))
    }

    fn insert_quotation(&mut self, quotation: Quotation) -> Result<Quotation, StoreError> {
        Ok(self.quotations.insert(quotation))
    }

    fn customer(&self, id: DbId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.get(id))
    }

    fn insert_customer(&mut self, customer: Customer) -> Result<Customer, StoreError> {
        Ok(self.customers.insert(customer))
    }

    fn order(&self, id: DbId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(id))
    }

    fn insert_order(&mut self, order: Order) -> Result<Order, StoreError> {
        Ok(self.orders.insert(order))
    }

    fn return_request(&self, id: DbId) -> Result<Option<ReturnRequest>, StoreError> {
        Ok(self.return_requests.get(id))
    }

    fn insert_return_request(
        &mut self,
        request: ReturnRequest,
    ) -> Result<ReturnRequest, StoreError> {
        Ok(self.return_requests.insert(request))
    }

    fn save_return_request(&mut self, request: &ReturnRequest) -> Result<(), StoreError> {
        self.return_requests.save(request)
    }
}

/// Thread-safe store with all-or-nothing units of work.
///
/// Units are serialised: a second unit waits for the first to commit or
/// roll back, so read-check-write sequences never interleave.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing tables, e.g. seeded fixtures.
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            committed: Mutex::new(tables),
        }
    }

    /// Committed row count per table, keyed by table name.
    pub fn row_counts(&self) -> Result<Vec<(&'static str, usize)>, StoreError> {
        let t = self.committed.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(vec![
            t.employees.counted(),
            t.assets.counted(),
            t.assignments.counted(),
            t.vendors.counted(),
            t.suppliers.counted(),
            t.repair_services.counted(),
            t.buffer_stocks.counted(),
            t.consumptions.counted(),
            t.procurement_requests.counted(),
            t.quotations.counted(),
            t.customers.counted(),
            t.orders.counted(),
            t.return_requests.counted(),
        ])
    }

    /// A copy of the committed state.
    pub fn snapshot(&self) -> Result<Tables, StoreError> {
        let committed = self.committed.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(committed.clone())
    }
}

impl DataAccess for MemoryStore {
    fn atomically<T, F>(&self, unit: F) -> Result<T, RuleError>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T, RuleError>,
    {
        let mut committed = self.committed.lock().map_err(|_| StoreError::Poisoned)?;
        let mut working = committed.clone();
        match unit(&mut working) {
            Ok(value) => {
                *committed = working;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Unit of work rolled back");
                Err(err)
            }
        }
    }
}
