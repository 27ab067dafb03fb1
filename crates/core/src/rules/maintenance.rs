//! Repair service lifecycle: schedule, start, complete.

use serde_json::json;

use super::{guards, require, Actor, Outbox, RuleEngine};
use crate::error::RuleError;
use crate::model::RepairService;
use crate::notify::{DomainEvent, EventName};
use crate::status::{AssetStatus, ServiceStatus};
use crate::store::DataAccess;
use crate::types::{DbId, Timestamp};
use crate::validation::maintenance::{NewRepairService, ServiceCompletion};

fn service_event(outbox: &mut Outbox, actor: &Actor, service: &RepairService, now: Timestamp) {
    outbox.push(
        DomainEvent::new(EventName::ServiceStatusUpdated, "RepairService", service.id, now)
            .with_actor(actor.user_id)
            .with_payload(json!({
                "assetId": service.asset_id,
                "status": service.status,
            })),
    );
}

impl<D: DataAccess> RuleEngine<'_, D> {
    /// Book an asset in for service. The asset is InMaintenance from now on.
    pub fn schedule_service(
        &self,
        actor: &Actor,
        input: NewRepairService,
    ) -> Result<RepairService, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            guards::initial_status(input.status, |s| s != ServiceStatus::Completed)?;
            let mut asset = require(repo.asset(input.asset_id)?, "Asset", input.asset_id)?;
            require(repo.vendor(input.vendor_id)?, "ServiceVendor", input.vendor_id)?;
            guards::asset_not_retired(&asset)?;

            let service = repo.insert_repair_service(RepairService::from_input(input, now))?;
            asset.status = AssetStatus::InMaintenance;
            repo.save_asset(&asset)?;

            tracing::info!(
                service_id = service.id,
                asset_id = asset.id,
                status = %service.status,
                "Service scheduled",
            );
            service_event(outbox, actor, &service, now);
            Ok(service)
        })
    }

    pub fn start_service(&self, actor: &Actor, service_id: DbId) -> Result<RepairService, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            let mut service = require(repo.repair_service(service_id)?, "RepairService", service_id)?;
            guards::service_startable(&service)?;

            service.status = ServiceStatus::InProgress;
            repo.save_repair_service(&service)?;
            tracing::info!(service_id, "Service started");
            service_event(outbox, actor, &service, now);
            Ok(service)
        })
    }

    /// Close a service and settle its asset.
    ///
    /// The asset stays InMaintenance while another service is open, goes
    /// back to Assigned when an Active assignment exists, else Available.
    pub fn complete_service(
        &self,
        actor: &Actor,
        service_id: DbId,
        completion: ServiceCompletion,
    ) -> Result<RepairService, RuleError> {
        let now = self.now();
        let completed_at = completion.completion_date.unwrap_or(now);
        self.transact(|repo, outbox| {
            let mut service = require(repo.repair_service(service_id)?, "RepairService", service_id)?;
            guards::service_completable(&service, completed_at)?;

            service.status = ServiceStatus::Completed;
            service.completion_date = Some(completed_at);
            if completion.resolution.is_some() {
                service.resolution = completion.resolution;
            }
            repo.save_repair_service(&service)?;

            if let Some(mut asset) = repo.asset(service.asset_id)? {
                let others_open = repo
                    .open_services(asset.id)?
                    .iter()
                    .any(|other| other.id != service.id);
                let assigned = !repo.active_assignments(asset.id)?.is_empty();
                asset.status = guards::status_after_service(asset.status, others_open, assigned);
                repo.save_asset(&asset)?;
                tracing::info!(service_id, asset_id = asset.id, status = %asset.status, "Service completed");
            }

            service_event(outbox, actor, &service, now);
            Ok(service)
        })
    }
}
