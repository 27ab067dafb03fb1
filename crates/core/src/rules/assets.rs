//! Holder and asset lifecycle: registration, assignment, return, disposal.

use serde_json::json;

use super::{guards, require, Actor, RuleEngine};
use crate::error::RuleError;
use crate::model::{Asset, Assignment, Employee, ServiceVendor, Supplier};
use crate::notify::{DomainEvent, EventName};
use crate::status::{AssetStatus, AssignmentStatus};
use crate::store::DataAccess;
use crate::types::{DbId, Timestamp};
use crate::validation::assets::{NewAsset, NewAssignment};
use crate::validation::maintenance::NewServiceVendor;
use crate::validation::people::NewEmployee;
use crate::validation::procurement::NewSupplier;

impl<D: DataAccess> RuleEngine<'_, D> {
    pub fn register_employee(&self, actor: &Actor, input: NewEmployee) -> Result<Employee, RuleError> {
        self.transact(|repo, _| {
            let employee = repo.insert_employee(Employee::from_input(input))?;
            tracing::info!(employee_id = employee.id, actor = actor.user_id, "Employee registered");
            Ok(employee)
        })
    }

    /// Holders are never deleted, only deactivated.
    pub fn deactivate_employee(&self, actor: &Actor, employee_id: DbId) -> Result<Employee, RuleError> {
        self.transact(|repo, _| {
            let mut employee = require(repo.employee(employee_id)?, "Employee", employee_id)?;
            employee.is_active = false;
            repo.save_employee(&employee)?;
            tracing::info!(employee_id, actor = actor.user_id, "Employee deactivated");
            Ok(employee)
        })
    }

    pub fn register_vendor(&self, actor: &Actor, input: NewServiceVendor) -> Result<ServiceVendor, RuleError> {
        self.transact(|repo, _| {
            let vendor = repo.insert_vendor(ServiceVendor::from_input(input))?;
            tracing::info!(vendor_id = vendor.id, actor = actor.user_id, "Service vendor registered");
            Ok(vendor)
        })
    }

    pub fn register_supplier(&self, actor: &Actor, input: NewSupplier) -> Result<Supplier, RuleError> {
        self.transact(|repo, _| {
            let supplier = repo.insert_supplier(Supplier::from_input(input))?;
            tracing::info!(supplier_id = supplier.id, actor = actor.user_id, "Supplier registered");
            Ok(supplier)
        })
    }

    /// Store a new asset, Available unless the input says otherwise.
    ///
    /// An asset cannot be born Assigned: ownership only comes from an
    /// assignment.
    pub fn register_asset(&self, actor: &Actor, input: NewAsset) -> Result<Asset, RuleError> {
        self.transact(|repo, _| {
            guards::initial_status(input.status, |s| s != AssetStatus::Assigned)?;
            if let Some(holder_id) = input.owner_holder_id {
                require(repo.employee(holder_id)?, "Employee", holder_id)?;
            }
            if let Some(supplier_id) = input.supplier_id {
                require(repo.supplier(supplier_id)?, "Supplier", supplier_id)?;
            }
            let asset = repo.insert_asset(Asset::from_input(input))?;
            tracing::info!(asset_id = asset.id, status = %asset.status, actor = actor.user_id, "Asset registered");
            Ok(asset)
        })
    }

    /// Hand an Available asset to an active employee.
    ///
    /// The availability check and the new assignment commit together, so an
    /// asset never has two Active assignments.
    pub fn assign_asset(&self, actor: &Actor, input: NewAssignment) -> Result<Assignment, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            guards::initial_status(input.status, |s| s == AssignmentStatus::Active)?;
            let mut asset = require(repo.asset(input.asset_id)?, "Asset", input.asset_id)?;
            guards::asset_assignable(&asset)?;
            let employee = require(repo.employee(input.employee_id)?, "Employee", input.employee_id)?;
            guards::employee_active(&employee)?;

            asset.status = AssetStatus::Assigned;
            asset.owner_holder_id = Some(employee.id);
            repo.save_asset(&asset)?;
            let assignment = repo.insert_assignment(Assignment::from_input(input, now))?;

            tracing::info!(
                assignment_id = assignment.id,
                asset_id = asset.id,
                employee_id = employee.id,
                "Asset assigned",
            );
            outbox.push(
                DomainEvent::new(EventName::AssignmentUpdated, "Assignment", assignment.id, now)
                    .with_actor(actor.user_id)
                    .with_payload(json!({
                        "assetId": asset.id,
                        "employeeId": employee.id,
                        "status": assignment.status,
                    })),
            );
            Ok(assignment)
        })
    }

    /// Close an Active assignment. The return date defaults to now.
    pub fn return_asset(
        &self,
        actor: &Actor,
        assignment_id: DbId,
        return_date: Option<Timestamp>,
    ) -> Result<Assignment, RuleError> {
        let now = self.now();
        let returned_at = return_date.unwrap_or(now);
        self.transact(|repo, outbox| {
            let mut assignment =
                require(repo.assignment(assignment_id)?, "Assignment", assignment_id)?;
            guards::assignment_returnable(&assignment, returned_at)?;

            assignment.status = AssignmentStatus::Returned;
            assignment.return_date = Some(returned_at);
            repo.save_assignment(&assignment)?;

            if let Some(mut asset) = repo.asset(assignment.asset_id)? {
                let open_services = !repo.open_services(asset.id)?.is_empty();
                asset.status = guards::status_after_return(asset.status, open_services);
                asset.owner_holder_id = None;
                repo.save_asset(&asset)?;
                tracing::info!(
                    assignment_id,
                    asset_id = asset.id,
                    status = %asset.status,
                    "Asset returned",
                );
            }

            outbox.push(
                DomainEvent::new(EventName::AssignmentUpdated, "Assignment", assignment.id, now)
                    .with_actor(actor.user_id)
                    .with_payload(json!({
                        "assetId": assignment.asset_id,
                        "employeeId": assignment.employee_id,
                        "status": assignment.status,
                    })),
            );
            Ok(assignment)
        })
    }

    /// Retire an asset for good. Refused while it is still assigned.
    pub fn dispose_asset(&self, actor: &Actor, asset_id: DbId) -> Result<Asset, RuleError> {
        self.transact(|repo, _| {
            let mut asset = require(repo.asset(asset_id)?, "Asset", asset_id)?;
            let active = repo.active_assignments(asset_id)?;
            guards::asset_disposable(&asset, active.len())?;

            asset.status = AssetStatus::Retired;
            repo.save_asset(&asset)?;
            tracing::info!(asset_id, actor = actor.user_id, "Asset retired");
            Ok(asset)
        })
    }

    pub fn mark_asset_lost(&self, actor: &Actor, asset_id: DbId) -> Result<Asset, RuleError> {
        self.transact(|repo, _| {
            let mut asset = require(repo.asset(asset_id)?, "Asset", asset_id)?;
            guards::asset_not_retired(&asset)?;

            asset.status = AssetStatus::Lost;
            repo.save_asset(&asset)?;
            tracing::info!(asset_id, actor = actor.user_id, "Asset marked lost");
            Ok(asset)
        })
    }
}
