//! Buffer stock: registration, consumption, restocking and auto-reorder.

use serde_json::json;

use super::{guards, require, Actor, Outbox, RuleEngine};
use crate::error::RuleError;
use crate::model::{BufferConsumption, BufferStock, ProcurementRequest};
use crate::notify::{DomainEvent, EventName};
use crate::status::ConsumptionStatus;
use crate::store::{DataAccess, Repository};
use crate::types::{DbId, Timestamp};
use crate::validation::stock::{NewBufferStock, NewConsumption, StockAdjustment};

/// Runs after every quantity change, inside the same unit.
///
/// A stock at or below its floor raises `stock.low`. With auto-reorder
/// enabled it also gets one refill request, unless an open auto-generated
/// request for it already exists.
fn reorder_check(
    repo: &mut dyn Repository,
    outbox: &mut Outbox,
    stock: &BufferStock,
    now: Timestamp,
) -> Result<Option<ProcurementRequest>, RuleError> {
    if !stock.is_low() {
        return Ok(None);
    }
    tracing::info!(
        stock_id = stock.id,
        available = stock.quantity_available,
        minimum = stock.minimum_stock_level,
        "Buffer stock low",
    );
    outbox.push(
        DomainEvent::new(EventName::StockLow, "BufferStock", stock.id, now).with_payload(json!({
            "itemName": stock.item_name,
            "quantityAvailable": stock.quantity_available,
            "minimumStockLevel": stock.minimum_stock_level,
        })),
    );

    if !stock.auto_reorder_enabled {
        return Ok(None);
    }
    if let Some(open) = repo.open_reorder(stock.id)? {
        tracing::debug!(stock_id = stock.id, request_id = open.id, "Reorder already open");
        return Ok(None);
    }

    let request = repo.insert_procurement_request(ProcurementRequest::reorder_for(stock, now))?;
    tracing::info!(
        stock_id = stock.id,
        request_id = request.id,
        quantity = request.quantity,
        "Auto-reorder created",
    );
    outbox.push(
        DomainEvent::new(EventName::ProcurementRequestCreated, "ProcurementRequest", request.id, now)
            .with_actor(request.requested_by)
            .with_payload(json!({
                "bufferStockId": stock.id,
                "quantity": request.quantity,
                "autoGenerated": true,
            })),
    );
    Ok(Some(request))
}

impl<D: DataAccess> RuleEngine<'_, D> {
    pub fn register_buffer_stock(
        &self,
        actor: &Actor,
        input: NewBufferStock,
    ) -> Result<BufferStock, RuleError> {
        self.transact(|repo, _| {
            require(repo.employee(input.managed_by)?, "Employee", input.managed_by)?;
            let stock = repo.insert_buffer_stock(BufferStock::from_input(input))?;
            tracing::info!(stock_id = stock.id, actor = actor.user_id, "Buffer stock registered");
            Ok(stock)
        })
    }

    /// Take `quantityConsumed` out of stock and record a Pending consumption.
    ///
    /// The sufficiency check and the decrement commit together.
    pub fn consume_stock(
        &self,
        actor: &Actor,
        input: NewConsumption,
    ) -> Result<BufferConsumption, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            guards::initial_status(input.status, |s| s == ConsumptionStatus::Pending)?;
            let mut stock =
                require(repo.buffer_stock(input.buffer_stock_id)?, "BufferStock", input.buffer_stock_id)?;
            require(repo.employee(input.requested_by)?, "Employee", input.requested_by)?;
            guards::stock_sufficient(&stock, input.quantity_consumed)?;

            stock.quantity_available -= input.quantity_consumed;
            repo.save_buffer_stock(&stock)?;
            let consumption = repo.insert_consumption(BufferConsumption::from_input(input, now))?;
            tracing::info!(
                stock_id = stock.id,
                consumption_id = consumption.id,
                remaining = stock.quantity_available,
                actor = actor.user_id,
                "Buffer stock consumed",
            );

            reorder_check(repo, outbox, &stock, now)?;
            Ok(consumption)
        })
    }

    pub fn approve_consumption(
        &self,
        actor: &Actor,
        consumption_id: DbId,
    ) -> Result<BufferConsumption, RuleError> {
        self.transact(|repo, _| {
            let mut consumption =
                require(repo.consumption(consumption_id)?, "BufferConsumption", consumption_id)?;
            guards::consumption_approvable(&consumption, actor.user_id)?;

            consumption.status = ConsumptionStatus::Approved;
            consumption.approved_by = Some(actor.user_id);
            repo.save_consumption(&consumption)?;
            tracing::info!(consumption_id, approver = actor.user_id, "Consumption approved");
            Ok(consumption)
        })
    }

    pub fn complete_consumption(
        &self,
        actor: &Actor,
        consumption_id: DbId,
    ) -> Result<BufferConsumption, RuleError> {
        self.transact(|repo, _| {
            let mut consumption =
                require(repo.consumption(consumption_id)?, "BufferConsumption", consumption_id)?;
            guards::consumption_completable(&consumption)?;

            consumption.status = ConsumptionStatus::Completed;
            repo.save_consumption(&consumption)?;
            tracing::info!(consumption_id, actor = actor.user_id, "Consumption completed");
            Ok(consumption)
        })
    }

    /// Set the on-hand quantity, never above the maximum level.
    pub fn restock(
        &self,
        actor: &Actor,
        stock_id: DbId,
        adjustment: StockAdjustment,
    ) -> Result<BufferStock, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            let mut stock = require(repo.buffer_stock(stock_id)?, "BufferStock", stock_id)?;
            guards::within_maximum(&stock, adjustment.quantity_available)?;

            stock.quantity_available = adjustment.quantity_available;
            repo.save_buffer_stock(&stock)?;
            tracing::info!(
                stock_id,
                quantity = stock.quantity_available,
                actor = actor.user_id,
                "Buffer stock adjusted",
            );

            reorder_check(repo, outbox, &stock, now)?;
            Ok(stock)
        })
    }
}
