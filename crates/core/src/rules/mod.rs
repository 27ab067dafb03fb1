//! Business rule layer.
//!
//! [`RuleEngine`] runs each lifecycle operation as one unit of work: load the
//! records it needs, check its guards in order, write, and only after the
//! unit commits publish the events it produced. Inputs are already
//! schema-validated; this layer only judges them against persisted state.

pub mod assets;
pub mod commerce;
pub mod guards;
pub mod maintenance;
pub mod procurement;
pub mod stock;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RuleError;
use crate::notify::{DomainEvent, Notifier};
use crate::status::Role;
use crate::store::{DataAccess, Repository};
use crate::types::{DbId, Timestamp};
use crate::validation::{root_object, FieldReader, Mode, Need, ValidationErrors, ViolationKind, When};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Events produced inside a unit, held back until it commits.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<DomainEvent>,
}

impl Outbox {
    pub fn push(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub struct RuleEngine<'a, D: DataAccess> {
    store: &'a D,
    notifier: &'a dyn Notifier,
    clock: Option<Timestamp>,
}

impl<'a, D: DataAccess> RuleEngine<'a, D> {
    pub fn new(store: &'a D, notifier: &'a dyn Notifier) -> Self {
        Self {
            store,
            notifier,
            clock: None,
        }
    }

    /// Pin the instant used for defaulted dates.
    pub fn at(mut self, now: Timestamp) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn now(&self) -> Timestamp {
        self.clock.unwrap_or_else(Utc::now)
    }

    /// Run `unit` atomically, then publish whatever it put in the outbox.
    ///
    /// Nothing is published when the unit fails.
    fn transact<T, F>(&self, unit: F) -> Result<T, RuleError>
    where
        F: FnOnce(&mut dyn Repository, &mut Outbox) -> Result<T, RuleError>,
    {
        let mut outbox = Outbox::default();
        let value = self.store.atomically(|repo| unit(repo, &mut outbox))?;
        for event in outbox.events {
            tracing::debug!(event = %event.name, entity_id = event.entity_id, "Publishing event");
            self.notifier.publish(event);
        }
        Ok(value)
    }
}

/// Turn an absent record into [`RuleError::NotFound`].
pub(crate) fn require<T>(found: Option<T>, entity: &'static str, id: DbId) -> Result<T, RuleError> {
    found.ok_or(RuleError::NotFound { entity, id })
}

/// A single guard, evaluated read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum RuleCheck {
    #[serde(rename_all = "camelCase")]
    AssetAssignable { asset_id: DbId },
    #[serde(rename_all = "camelCase")]
    AssetDisposable { asset_id: DbId },
    #[serde(rename_all = "camelCase")]
    AssignmentReturnable {
        assignment_id: DbId,
        return_date: Option<Timestamp>,
    },
    #[serde(rename_all = "camelCase")]
    StockSufficient { buffer_stock_id: DbId, quantity: i64 },
    #[serde(rename_all = "camelCase")]
    RequestApprovable { request_id: DbId, approver_id: DbId },
    #[serde(rename_all = "camelCase")]
    ServiceCompletable {
        service_id: DbId,
        completion_date: Option<Timestamp>,
    },
}

const RULE_NAMES: &str = "AssetAssignable, AssetDisposable, AssignmentReturnable, \
    StockSufficient, RequestApprovable, ServiceCompletable";

impl RuleCheck {
    pub fn from_json(raw: &Value) -> Result<Self, ValidationErrors> {
        Self::from_json_at(raw, Utc::now())
    }

    /// Read a check from an untrusted body with the same field readers the
    /// entity schemas use: ids are positive, quantities at least 1 and dates
    /// may be calendar days.
    pub fn from_json_at(raw: &Value, now: Timestamp) -> Result<Self, ValidationErrors> {
        let data = root_object(raw)?;
        let mut r = FieldReader::new(data, Mode::Create, now);
        let check = match r.text("rule", 64, Need::Required).as_deref() {
            None => None,
            Some("AssetAssignable") => r
                .id("assetId", Need::Required)
                .map(|asset_id| Self::AssetAssignable { asset_id }),
            Some("AssetDisposable") => r
                .id("assetId", Need::Required)
                .map(|asset_id| Self::AssetDisposable { asset_id }),
            Some("AssignmentReturnable") => {
                let assignment_id = r.id("assignmentId", Need::Required);
                let return_date = r.date("returnDate", When::Any, Need::Optional);
                assignment_id.map(|assignment_id| Self::AssignmentReturnable {
                    assignment_id,
                    return_date,
                })
            }
            Some("StockSufficient") => {
                let buffer_stock_id = r.id("bufferStockId", Need::Required);
                let quantity = r.integer("quantity", 1, i64::MAX, Need::Required);
                buffer_stock_id
                    .zip(quantity)
                    .map(|(buffer_stock_id, quantity)| Self::StockSufficient {
                        buffer_stock_id,
                        quantity,
                    })
            }
            Some("RequestApprovable") => {
                let request_id = r.id("requestId", Need::Required);
                let approver_id = r.id("approverId", Need::Required);
                request_id
                    .zip(approver_id)
                    .map(|(request_id, approver_id)| Self::RequestApprovable {
                        request_id,
                        approver_id,
                    })
            }
            Some("ServiceCompletable") => {
                let service_id = r.id("serviceId", Need::Required);
                let completion_date = r.date("completionDate", When::Any, Need::Optional);
                service_id.map(|service_id| Self::ServiceCompletable {
                    service_id,
                    completion_date,
                })
            }
            Some(_) => {
                r.reject(
                    "rule",
                    ViolationKind::InvalidEnum,
                    format!("must be one of: {RULE_NAMES}"),
                );
                None
            }
        };
        r.finish(check)
    }
}

pub fn check_rule(rule: &RuleCheck, repo: &dyn Repository) -> Result<(), RuleError> {
    check_rule_at(rule, repo, Utc::now())
}

/// Evaluate `rule` against `repo`; omitted dates default to `now`.
pub fn check_rule_at(
    rule: &RuleCheck,
    repo: &dyn Repository,
    now: Timestamp,
) -> Result<(), RuleError> {
    match *rule {
        RuleCheck::AssetAssignable { asset_id } => {
            let asset = require(repo.asset(asset_id)?, "Asset", asset_id)?;
            guards::asset_assignable(&asset)?;
        }
        RuleCheck::AssetDisposable { asset_id } => {
            let asset = require(repo.asset(asset_id)?, "Asset", asset_id)?;
            let active = repo.active_assignments(asset_id)?;
            guards::asset_disposable(&asset, active.len())?;
        }
        RuleCheck::AssignmentReturnable {
            assignment_id,
            return_date,
        } => {
            let assignment = require(repo.assignment(assignment_id)?, "Assignment", assignment_id)?;
            guards::assignment_returnable(&assignment, return_date.unwrap_or(now))?;
        }
        RuleCheck::StockSufficient {
            buffer_stock_id,
            quantity,
        } => {
            let stock = require(repo.buffer_stock(buffer_stock_id)?, "BufferStock", buffer_stock_id)?;
            guards::stock_sufficient(&stock, quantity)?;
        }
        RuleCheck::RequestApprovable {
            request_id,
            approver_id,
        } => {
            let request = require(
                repo.procurement_request(request_id)?,
                "ProcurementRequest",
                request_id,
            )?;
            guards::request_decidable(&request, approver_id)?;
        }
        RuleCheck::ServiceCompletable {
            service_id,
            completion_date,
        } => {
            let service = require(repo.repair_service(service_id)?, "RepairService", service_id)?;
            guards::service_completable(&service, completion_date.unwrap_or(now))?;
        }
    }
    Ok(())
}
