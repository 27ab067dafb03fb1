//! Buffer stock consumption, restocking and automatic reorders.

mod common;

use assert_matches::assert_matches;
use fleetkeep_core::error::{RuleCode, RuleError};
use fleetkeep_core::model::{BufferConsumption, BufferStock, Employee};
use fleetkeep_core::notify::EventName;
use fleetkeep_core::status::{ConsumptionStatus, RequestStatus, RequestType};
use fleetkeep_core::validation::stock::{NewBufferStock, NewConsumption, StockAdjustment};
use fleetkeep_core::validation::Schema;
use serde_json::json;

use common::{admin, input, Harness};

fn consume(
    h: &Harness,
    stock: &BufferStock,
    by: &Employee,
    quantity: i64,
) -> Result<BufferConsumption, RuleError> {
    let raw = json!({
        "bufferStockId": stock.id,
        "quantityConsumed": quantity,
        "requestedBy": by.id,
        "purpose": "New starters",
    });
    h.engine().consume_stock(&h.actor(by), input::<NewConsumption>(raw))
}

fn set_quantity(h: &Harness, stock: &BufferStock, quantity: i64) -> Result<BufferStock, RuleError> {
    let adjustment: StockAdjustment = input(json!({"quantityAvailable": quantity}));
    h.engine().restock(&admin(), stock.id, adjustment)
}

// ---------------------------------------------------------------------------
// Consumption
// ---------------------------------------------------------------------------

#[test]
fn consumption_decrements_stock_and_starts_pending() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 100, false);

    let consumption = consume(&h, &stock, &manager, 30).unwrap();

    assert_eq!(consumption.status, ConsumptionStatus::Pending);
    assert_eq!(h.tables().buffer_stocks.get(stock.id).unwrap().quantity_available, 70);
    assert!(h.notifier.events().is_empty());
}

#[test]
fn consuming_more_than_available_is_refused() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 10, false);

    let err = consume(&h, &stock, &manager, 11).unwrap_err();

    assert_eq!(err.code(), Some(RuleCode::InsufficientStock));
    let tables = h.tables();
    assert_eq!(tables.buffer_stocks.get(stock.id).unwrap().quantity_available, 10);
    assert!(tables.consumptions.is_empty());
}

#[test]
fn consuming_exactly_what_is_left_empties_the_stock() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 10, false);

    consume(&h, &stock, &manager, 10).unwrap();

    assert_eq!(h.tables().buffer_stocks.get(stock.id).unwrap().quantity_available, 0);
}

#[test]
fn consumption_by_unknown_employee_is_not_found() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 100, false);
    let raw = json!({"bufferStockId": stock.id, "quantityConsumed": 1, "requestedBy": 77});

    let err = h.engine().consume_stock(&admin(), input::<NewConsumption>(raw)).unwrap_err();

    assert_matches!(err, RuleError::NotFound { entity: "Employee", id: 77 });
}

#[test]
fn consumption_approval_flow() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let worker = h.employee("Will");
    let stock = h.stock(&manager, 100, false);
    let consumption = consume(&h, &stock, &worker, 5).unwrap();

    let err = h
        .engine()
        .complete_consumption(&h.actor(&manager), consumption.id)
        .unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::ConsumptionNotApproved));

    let err = h
        .engine()
        .approve_consumption(&h.actor(&worker), consumption.id)
        .unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::CannotApproveOwnRequest));

    let approved = h
        .engine()
        .approve_consumption(&h.actor(&manager), consumption.id)
        .unwrap();
    assert_eq!(approved.status, ConsumptionStatus::Approved);
    assert_eq!(approved.approved_by, Some(manager.id));

    let err = h
        .engine()
        .approve_consumption(&h.actor(&manager), consumption.id)
        .unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::ConsumptionNotPending));

    let completed = h
        .engine()
        .complete_consumption(&h.actor(&manager), consumption.id)
        .unwrap();
    assert_eq!(completed.status, ConsumptionStatus::Completed);
}

// ---------------------------------------------------------------------------
// Restocking
// ---------------------------------------------------------------------------

#[test]
fn restock_is_capped_at_the_maximum_level() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 50, false);

    let err = set_quantity(&h, &stock, 201).unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::StockAboveMaximum));

    let full = set_quantity(&h, &stock, 200).unwrap();
    assert_eq!(full.quantity_available, 200);
}

#[test]
fn buffer_stock_levels_are_validated_together() {
    let raw = json!({
        "itemName": "Mouse",
        "itemType": "Peripheral",
        "quantityAvailable": 5,
        "minimumStockLevel": 10,
        "maximumStockLevel": 10,
        "managedBy": 1,
    });

    let errors = NewBufferStock::create_at(&raw, common::now()).unwrap_err();

    assert!(errors.fields().contains(&"maximumStockLevel"));
}

#[test]
fn buffer_stock_needs_an_existing_manager() {
    let h = Harness::new();
    let raw = json!({
        "itemName": "Mouse",
        "itemType": "Peripheral",
        "quantityAvailable": 5,
        "minimumStockLevel": 2,
        "maximumStockLevel": 10,
        "managedBy": 3,
    });

    let err = h
        .engine()
        .register_buffer_stock(&admin(), input::<NewBufferStock>(raw))
        .unwrap_err();

    assert_matches!(err, RuleError::NotFound { entity: "Employee", id: 3 });
}

// ---------------------------------------------------------------------------
// Low stock and auto-reorder
// ---------------------------------------------------------------------------

#[test]
fn reaching_the_floor_raises_stock_low_only() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 25, false);

    consume(&h, &stock, &manager, 5).unwrap();

    assert_eq!(h.notifier.names(), vec![EventName::StockLow]);
    assert!(h.tables().procurement_requests.is_empty());
}

#[test]
fn staying_above_the_floor_is_quiet() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 25, true);

    consume(&h, &stock, &manager, 4).unwrap();

    assert!(h.notifier.events().is_empty());
}

#[test]
fn auto_reorder_requests_a_refill_to_maximum() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 25, true);

    consume(&h, &stock, &manager, 10).unwrap();

    let tables = h.tables();
    let request = tables.procurement_requests.iter().next().unwrap();
    assert!(request.auto_generated);
    assert_eq!(request.request_type, RequestType::BufferStock);
    assert_eq!(request.buffer_stock_id, Some(stock.id));
    assert_eq!(request.quantity, 185);
    assert_eq!(request.requested_by, manager.id);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(
        h.notifier.names(),
        vec![EventName::StockLow, EventName::ProcurementRequestCreated]
    );
}

#[test]
fn open_reorder_is_not_duplicated() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 25, true);

    consume(&h, &stock, &manager, 10).unwrap();
    consume(&h, &stock, &manager, 5).unwrap();
    set_quantity(&h, &stock, 3).unwrap();

    assert_eq!(h.tables().procurement_requests.len(), 1);
    assert_eq!(h.notifier.count(EventName::StockLow), 3);
    assert_eq!(h.notifier.count(EventName::ProcurementRequestCreated), 1);
}

#[test]
fn closed_reorder_allows_a_new_one() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let approver = h.employee("Abe");
    let stock = h.stock(&manager, 25, true);
    consume(&h, &stock, &manager, 10).unwrap();
    let first = h.tables().procurement_requests.iter().next().unwrap().id;

    h.engine().reject_request(&h.actor(&approver), first).unwrap();
    consume(&h, &stock, &manager, 1).unwrap();

    let tables = h.tables();
    assert_eq!(tables.procurement_requests.len(), 2);
    let second = tables.procurement_requests.iter().last().unwrap();
    assert_eq!(second.quantity, 186);
}

#[test]
fn failed_consumption_publishes_nothing() {
    let h = Harness::new();
    let manager = h.employee("Mia");
    let stock = h.stock(&manager, 25, true);

    consume(&h, &stock, &manager, 26).unwrap_err();

    assert!(h.notifier.events().is_empty());
    assert!(h.tables().procurement_requests.is_empty());
}
