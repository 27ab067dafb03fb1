//! Repair services and the asset status they drive.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use fleetkeep_core::error::{RuleCode, RuleError};
use fleetkeep_core::model::{Asset, RepairService, ServiceVendor};
use fleetkeep_core::notify::EventName;
use fleetkeep_core::rules::RuleEngine;
use fleetkeep_core::status::{AssetStatus, ServiceStatus};
use fleetkeep_core::validation::maintenance::{NewRepairService, ServiceCompletion};
use fleetkeep_db::MemoryStore;
use serde_json::{json, Value};

use common::{admin, input, now, Harness};

fn schedule(h: &Harness, asset: &Asset, vendor: &ServiceVendor) -> RepairService {
    let raw = json!({
        "assetId": asset.id,
        "vendorId": vendor.id,
        "serviceType": "Maintenance",
        "description": "Annual check",
    });
    h.engine()
        .schedule_service(&admin(), input::<NewRepairService>(raw))
        .unwrap()
}

fn completion(raw: Value) -> ServiceCompletion {
    input(raw)
}

#[test]
fn scheduling_puts_the_asset_in_maintenance() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();

    let service = schedule(&h, &laptop, &vendor);

    assert_eq!(service.status, ServiceStatus::Scheduled);
    assert_eq!(service.service_date, now());
    assert_eq!(
        h.tables().assets.get(laptop.id).unwrap().status,
        AssetStatus::InMaintenance
    );
    assert_eq!(h.notifier.names(), vec![EventName::ServiceStatusUpdated]);
}

#[test]
fn scheduling_needs_an_existing_vendor() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let raw = json!({
        "assetId": laptop.id,
        "vendorId": 7,
        "serviceType": "Repair",
        "description": "Fan noise",
    });

    let err = h
        .engine()
        .schedule_service(&admin(), input::<NewRepairService>(raw))
        .unwrap_err();

    assert_matches!(err, RuleError::NotFound { entity: "ServiceVendor", id: 7 });
    assert_eq!(h.tables().assets.get(laptop.id).unwrap().status, AssetStatus::Available);
}

#[test]
fn retired_assets_are_not_serviced() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    h.engine().dispose_asset(&admin(), laptop.id).unwrap();
    let raw = json!({
        "assetId": laptop.id,
        "vendorId": vendor.id,
        "serviceType": "Inspection",
        "description": "Before scrapping",
    });

    let err = h
        .engine()
        .schedule_service(&admin(), input::<NewRepairService>(raw))
        .unwrap_err();

    assert_eq!(err.code(), Some(RuleCode::AssetRetired));
    assert!(h.tables().repair_services.is_empty());
}

#[test]
fn service_cannot_be_created_completed() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let raw = json!({
        "assetId": laptop.id,
        "vendorId": vendor.id,
        "serviceType": "Repair",
        "description": "Already done",
        "status": "Completed",
    });

    let err = h
        .engine()
        .schedule_service(&admin(), input::<NewRepairService>(raw))
        .unwrap_err();

    assert_eq!(err.code(), Some(RuleCode::InvalidInitialStatus));
}

#[test]
fn only_scheduled_services_start() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let service = schedule(&h, &laptop, &vendor);

    let started = h.engine().start_service(&admin(), service.id).unwrap();
    assert_eq!(started.status, ServiceStatus::InProgress);

    let err = h.engine().start_service(&admin(), service.id).unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::ServiceNotScheduled));
}

#[test]
fn completing_returns_an_unassigned_asset_to_available() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let service = schedule(&h, &laptop, &vendor);
    h.engine().start_service(&admin(), service.id).unwrap();

    let done = h
        .engine()
        .complete_service(&admin(), service.id, completion(json!({"resolution": "Replaced fan"})))
        .unwrap();

    assert_eq!(done.status, ServiceStatus::Completed);
    assert_eq!(done.completion_date, Some(now()));
    assert_eq!(done.resolution.as_deref(), Some("Replaced fan"));
    assert_eq!(h.tables().assets.get(laptop.id).unwrap().status, AssetStatus::Available);
    assert_eq!(h.notifier.count(EventName::ServiceStatusUpdated), 3);
}

#[test]
fn completing_returns_an_assigned_asset_to_assigned() {
    let h = Harness::new();
    let ann = h.employee("Ann");
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    h.engine()
        .assign_asset(&admin(), input(json!({"assetId": laptop.id, "employeeId": ann.id})))
        .unwrap();
    let service = schedule(&h, &laptop, &vendor);

    h.engine()
        .complete_service(&admin(), service.id, completion(json!({})))
        .unwrap();

    assert_eq!(h.tables().assets.get(laptop.id).unwrap().status, AssetStatus::Assigned);
}

#[test]
fn asset_stays_in_maintenance_while_another_service_is_open() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let first = schedule(&h, &laptop, &vendor);
    let second = schedule(&h, &laptop, &vendor);

    h.engine()
        .complete_service(&admin(), first.id, completion(json!({})))
        .unwrap();
    assert_eq!(
        h.tables().assets.get(laptop.id).unwrap().status,
        AssetStatus::InMaintenance
    );

    h.engine()
        .complete_service(&admin(), second.id, completion(json!({})))
        .unwrap();
    assert_eq!(h.tables().assets.get(laptop.id).unwrap().status, AssetStatus::Available);
}

#[test]
fn completing_twice_is_refused() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let service = schedule(&h, &laptop, &vendor);
    h.engine()
        .complete_service(&admin(), service.id, completion(json!({})))
        .unwrap();

    let err = h
        .engine()
        .complete_service(&admin(), service.id, completion(json!({})))
        .unwrap_err();

    assert_eq!(err.code(), Some(RuleCode::ServiceAlreadyCompleted));
}

#[test]
fn completion_cannot_precede_the_service_date() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let service = schedule(&h, &laptop, &vendor);
    let early = (now() - Duration::days(2)).to_rfc3339();

    let err = h
        .engine()
        .complete_service(&admin(), service.id, completion(json!({"completionDate": early})))
        .unwrap_err();

    assert_eq!(err.code(), Some(RuleCode::CompletionBeforeServiceDate));
    assert_eq!(
        h.tables().repair_services.get(service.id).unwrap().status,
        ServiceStatus::Scheduled
    );
}

#[test]
fn completion_date_defaults_to_the_engine_clock() {
    let h = Harness::new();
    let laptop = h.asset("Laptop 1");
    let vendor = h.vendor();
    let service = schedule(&h, &laptop, &vendor);
    let later = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();

    let done = RuleEngine::<MemoryStore>::new(&h.store, &h.notifier)
        .at(later)
        .complete_service(&admin(), service.id, completion(json!({})))
        .unwrap();

    assert_eq!(done.completion_date, Some(later));
}
