//! Pure guard predicates over loaded records.
//!
//! Each guard returns the [`RuleViolation`] for the first condition that
//! fails. Operations load records, call guards in their documented order and
//! only then write.

use crate::error::{RuleCode, RuleViolation};
use crate::model::{
    Asset, Assignment, BufferConsumption, BufferStock, Employee, ProcurementRequest, RepairService,
};
use crate::status::{
    AssetStatus, AssignmentStatus, ConsumptionStatus, RequestStatus, ServiceStatus,
};
use crate::types::{DbId, Timestamp};

pub type GuardResult = Result<(), RuleViolation>;

fn reject(code: RuleCode) -> GuardResult {
    tracing::debug!(code = code.as_str(), "Guard rejected transition");
    Err(RuleViolation::new(code))
}

fn check(ok: bool, code: RuleCode) -> GuardResult {
    if ok {
        Ok(())
    } else {
        reject(code)
    }
}

/// A status supplied on a create must be one the record may start in.
pub fn initial_status<S: Copy>(given: Option<S>, allowed: impl Fn(S) -> bool) -> GuardResult {
    check(given.map_or(true, allowed), RuleCode::InvalidInitialStatus)
}

pub fn asset_assignable(asset: &Asset) -> GuardResult {
    check(asset.status == AssetStatus::Available, RuleCode::AssetNotAvailable)
}

pub fn employee_active(employee: &Employee) -> GuardResult {
    check(employee.is_active, RuleCode::EmployeeInactive)
}

/// Retired is terminal.
pub fn asset_not_retired(asset: &Asset) -> GuardResult {
    check(asset.status != AssetStatus::Retired, RuleCode::AssetRetired)
}

pub fn asset_disposable(asset: &Asset, active_assignments: usize) -> GuardResult {
    asset_not_retired(asset)?;
    check(active_assignments == 0, RuleCode::ActiveAssignmentsExist)
}

pub fn assignment_returnable(assignment: &Assignment, returned_at: Timestamp) -> GuardResult {
    check(
        assignment.status == AssignmentStatus::Active,
        RuleCode::AssignmentNotActive,
    )?;
    check(
        returned_at >= assignment.assigned_date,
        RuleCode::ReturnBeforeAssignment,
    )
}

pub fn service_startable(service: &RepairService) -> GuardResult {
    check(
        service.status == ServiceStatus::Scheduled,
        RuleCode::ServiceNotScheduled,
    )
}

pub fn service_completable(service: &RepairService, completed_at: Timestamp) -> GuardResult {
    check(
        service.status != ServiceStatus::Completed,
        RuleCode::ServiceAlreadyCompleted,
    )?;
    check(
        completed_at >= service.service_date,
        RuleCode::CompletionBeforeServiceDate,
    )
}

pub fn stock_sufficient(stock: &BufferStock, quantity: i64) -> GuardResult {
    check(quantity <= stock.quantity_available, RuleCode::InsufficientStock)
}

pub fn within_maximum(stock: &BufferStock, quantity: i64) -> GuardResult {
    check(quantity <= stock.maximum_stock_level, RuleCode::StockAboveMaximum)
}

pub fn consumption_approvable(consumption: &BufferConsumption, approver: DbId) -> GuardResult {
    check(
        consumption.status == ConsumptionStatus::Pending,
        RuleCode::ConsumptionNotPending,
    )?;
    check(
        consumption.requested_by != approver,
        RuleCode::CannotApproveOwnRequest,
    )
}

pub fn consumption_completable(consumption: &BufferConsumption) -> GuardResult {
    check(
        consumption.status == ConsumptionStatus::Approved,
        RuleCode::ConsumptionNotApproved,
    )
}

/// Self-approval is refused before the status is even looked at.
pub fn request_decidable(request: &ProcurementRequest, approver: DbId) -> GuardResult {
    check(
        request.requested_by != approver,
        RuleCode::CannotApproveOwnRequest,
    )?;
    check(
        request.status == RequestStatus::Pending,
        RuleCode::RequestNotPending,
    )
}

pub fn request_completable(request: &ProcurementRequest) -> GuardResult {
    check(
        request.status == RequestStatus::Approved,
        RuleCode::RequestNotApproved,
    )
}

pub fn request_accepts_quotes(request: &ProcurementRequest) -> GuardResult {
    check(
        !matches!(request.status, RequestStatus::Rejected | RequestStatus::Completed),
        RuleCode::RequestClosed,
    )
}

/// Asset state once an assignment ends. Lost and Retired assets keep
/// their status.
pub fn status_after_return(current: AssetStatus, open_services: bool) -> AssetStatus {
    match current {
        AssetStatus::Lost | AssetStatus::Retired => current,
        _ if open_services => AssetStatus::InMaintenance,
        _ => AssetStatus::Available,
    }
}

/// Asset state once one of its services completes.
pub fn status_after_service(
    current: AssetStatus,
    other_open_services: bool,
    active_assignment: bool,
) -> AssetStatus {
    match current {
        AssetStatus::Lost | AssetStatus::Retired => current,
        _ if other_open_services => AssetStatus::InMaintenance,
        _ if active_assignment => AssetStatus::Assigned,
        _ => AssetStatus::Available,
    }
}
