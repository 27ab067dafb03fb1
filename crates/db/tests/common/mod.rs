#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use fleetkeep_core::model::{
    Asset, BufferStock, Customer, Employee, ProcurementRequest, ServiceVendor, Supplier,
};
use fleetkeep_core::notify::CollectingNotifier;
use fleetkeep_core::rules::{Actor, RuleEngine};
use fleetkeep_core::status::Role;
use fleetkeep_core::types::Timestamp;
use fleetkeep_core::validation::assets::NewAsset;
use fleetkeep_core::validation::maintenance::NewServiceVendor;
use fleetkeep_core::validation::people::{NewCustomer, NewEmployee};
use fleetkeep_core::validation::procurement::{NewProcurementRequest, NewSupplier};
use fleetkeep_core::validation::stock::NewBufferStock;
use fleetkeep_core::validation::Schema;
use fleetkeep_db::MemoryStore;
use serde_json::{json, Value};

/// The instant every scenario runs at.
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn admin() -> Actor {
    Actor::new(1, Role::Admin)
}

/// Validate `raw` the way a caller must before invoking a rule.
pub fn input<S: Schema>(raw: Value) -> S {
    S::create_at(&raw, now()).expect("fixture input is valid")
}

/// A store, a notifier that records events, and seeding helpers that go
/// through the same validated operations callers use.
pub struct Harness {
    pub store: MemoryStore,
    pub notifier: CollectingNotifier,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            notifier: CollectingNotifier::new(),
        }
    }

    pub fn engine(&self) -> RuleEngine<'_, MemoryStore> {
        RuleEngine::new(&self.store, &self.notifier).at(now())
    }

    pub fn employee(&self, first_name: &str) -> Employee {
        let raw = json!({
            "firstName": first_name,
            "lastName": "Doe",
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "department": "IT",
            "position": "Developer",
            "hireDate": "2020-01-01",
        });
        self.engine()
            .register_employee(&admin(), input::<NewEmployee>(raw))
            .unwrap()
    }

    /// Acting as an existing employee.
    pub fn actor(&self, employee: &Employee) -> Actor {
        Actor::new(employee.id, employee.role)
    }

    pub fn asset(&self, name: &str) -> Asset {
        let raw = json!({
            "assetName": name,
            "assetType": "Laptop",
            "purchaseDate": "2022-01-01",
            "warrantyExpiry": "2025-01-01",
        });
        self.engine()
            .register_asset(&admin(), input::<NewAsset>(raw))
            .unwrap()
    }

    pub fn vendor(&self) -> ServiceVendor {
        let raw = json!({"vendorName": "FixIt Ltd", "rating": 4});
        self.engine()
            .register_vendor(&admin(), input::<NewServiceVendor>(raw))
            .unwrap()
    }

    pub fn supplier(&self) -> Supplier {
        let raw = json!({"supplierName": "Acme Supplies", "email": "sales@acme.example"});
        self.engine()
            .register_supplier(&admin(), input::<NewSupplier>(raw))
            .unwrap()
    }

    pub fn customer(&self) -> Customer {
        let raw = json!({"firstName": "Cara", "lastName": "Lee", "email": "cara@example.com"});
        self.engine()
            .register_customer(&admin(), input::<NewCustomer>(raw))
            .unwrap()
    }

    pub fn stock(&self, manager: &Employee, available: i64, auto_reorder: bool) -> BufferStock {
        let raw = json!({
            "itemName": "USB-C cable",
            "itemType": "Cable",
            "quantityAvailable": available,
            "minimumStockLevel": 20,
            "maximumStockLevel": 200,
            "autoReorderEnabled": auto_reorder,
            "managedBy": manager.id,
        });
        self.engine()
            .register_buffer_stock(&admin(), input::<NewBufferStock>(raw))
            .unwrap()
    }

    pub fn request(&self, requester: &Employee) -> ProcurementRequest {
        let raw = json!({
            "itemDescription": "Ergonomic chairs",
            "quantity": 4,
            "requestType": "Asset",
            "estimatedCost": 1200.0,
        });
        self.engine()
            .submit_request(&self.actor(requester), input::<NewProcurementRequest>(raw))
            .unwrap()
    }

    pub fn tables(&self) -> fleetkeep_db::Tables {
        self.store.snapshot().unwrap()
    }
}
