//! Procurement requests and supplier quotations.

use serde_json::json;

use super::{guards, require, Actor, RuleEngine};
use crate::error::RuleError;
use crate::model::{ProcurementRequest, Quotation};
use crate::notify::{DomainEvent, EventName};
use crate::status::{RequestStatus, RequestType};
use crate::store::DataAccess;
use crate::types::DbId;
use crate::validation::procurement::{NewProcurementRequest, NewQuotation};

impl<D: DataAccess> RuleEngine<'_, D> {
    /// File a Pending request. The requester defaults to the caller.
    pub fn submit_request(
        &self,
        actor: &Actor,
        input: NewProcurementRequest,
    ) -> Result<ProcurementRequest, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            guards::initial_status(input.status, |s| s == RequestStatus::Pending)?;
            let requested_by = input.requested_by.unwrap_or(actor.user_id);
            require(repo.employee(requested_by)?, "Employee", requested_by)?;
            if input.request_type == RequestType::BufferStock {
                if let Some(stock_id) = input.buffer_stock_id {
                    require(repo.buffer_stock(stock_id)?, "BufferStock", stock_id)?;
                }
            }

            let request = repo.insert_procurement_request(ProcurementRequest::from_input(
                input,
                requested_by,
                now,
            ))?;
            tracing::info!(
                request_id = request.id,
                request_type = %request.request_type,
                requested_by,
                "Procurement request submitted",
            );
            outbox.push(
                DomainEvent::new(EventName::ProcurementRequestCreated, "ProcurementRequest", request.id, now)
                    .with_actor(actor.user_id)
                    .with_payload(json!({
                        "requestType": request.request_type,
                        "quantity": request.quantity,
                        "bufferStockId": request.buffer_stock_id,
                        "autoGenerated": false,
                    })),
            );
            Ok(request)
        })
    }

    pub fn approve_request(&self, actor: &Actor, request_id: DbId) -> Result<ProcurementRequest, RuleError> {
        self.decide_request(actor, request_id, RequestStatus::Approved)
    }

    pub fn reject_request(&self, actor: &Actor, request_id: DbId) -> Result<ProcurementRequest, RuleError> {
        self.decide_request(actor, request_id, RequestStatus::Rejected)
    }

    fn decide_request(
        &self,
        actor: &Actor,
        request_id: DbId,
        decision: RequestStatus,
    ) -> Result<ProcurementRequest, RuleError> {
        self.transact(|repo, _| {
            let mut request =
                require(repo.procurement_request(request_id)?, "ProcurementRequest", request_id)?;
            guards::request_decidable(&request, actor.user_id)?;

            request.status = decision;
            request.approved_by = Some(actor.user_id);
            repo.save_procurement_request(&request)?;
            tracing::info!(request_id, status = %decision, approver = actor.user_id, "Procurement request decided");
            Ok(request)
        })
    }

    pub fn complete_request(&self, actor: &Actor, request_id: DbId) -> Result<ProcurementRequest, RuleError> {
        self.transact(|repo, _| {
            let mut request =
                require(repo.procurement_request(request_id)?, "ProcurementRequest", request_id)?;
            guards::request_completable(&request)?;

            request.status = RequestStatus::Completed;
            repo.save_procurement_request(&request)?;
            tracing::info!(request_id, actor = actor.user_id, "Procurement request completed");
            Ok(request)
        })
    }

    /// Attach a supplier's quote to a request that is still open.
    pub fn record_quotation(&self, actor: &Actor, input: NewQuotation) -> Result<Quotation, RuleError> {
        let now = self.now();
        self.transact(|repo, outbox| {
            require(repo.supplier(input.supplier_id)?, "Supplier", input.supplier_id)?;
            let request = require(
                repo.procurement_request(input.request_id)?,
                "ProcurementRequest",
                input.request_id,
            )?;
            guards::request_accepts_quotes(&request)?;

            let quotation = repo.insert_quotation(Quotation::from_input(input, now))?;
            tracing::info!(
                quotation_id = quotation.id,
                request_id = request.id,
                supplier_id = quotation.supplier_id,
                "Quotation recorded",
            );
            outbox.push(
                DomainEvent::new(EventName::QuotationReceived, "Quotation", quotation.id, now)
                    .with_actor(actor.user_id)
                    .with_payload(json!({
                        "requestId": request.id,
                        "supplierId": quotation.supplier_id,
                        "quotedPrice": quotation.quoted_price,
                    })),
            );
            Ok(quotation)
        })
    }
}
