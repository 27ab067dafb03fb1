//! Customers, orders and return requests.

use super::{guards, require, Actor, RuleEngine};
use crate::error::RuleError;
use crate::model::{Customer, Order, ReturnRequest};
use crate::status::ReturnStatus;
use crate::store::DataAccess;
use crate::types::DbId;
use crate::validation::commerce::{NewOrder, NewReturnRequest};
use crate::validation::people::NewCustomer;

impl<D: DataAccess> RuleEngine<'_, D> {
    pub fn register_customer(&self, actor: &Actor, input: NewCustomer) -> Result<Customer, RuleError> {
        self.transact(|repo, _| {
            let customer = repo.insert_customer(Customer::from_input(input))?;
            tracing::info!(customer_id = customer.id, actor = actor.user_id, "Customer registered");
            Ok(customer)
        })
    }

    pub fn place_order(&self, actor: &Actor, input: NewOrder) -> Result<Order, RuleError> {
        let now = self.now();
        self.transact(|repo, _| {
            require(repo.customer(input.customer_id)?, "Customer", input.customer_id)?;
            let order = repo.insert_order(Order::from_input(input, now))?;
            tracing::info!(
                order_id = order.id,
                customer_id = order.customer_id,
                items = order.items.len(),
                actor = actor.user_id,
                "Order placed",
            );
            Ok(order)
        })
    }

    /// Open a Pending return raised by a holder or a customer.
    pub fn open_return_request(
        &self,
        actor: &Actor,
        input: NewReturnRequest,
    ) -> Result<ReturnRequest, RuleError> {
        let now = self.now();
        self.transact(|repo, _| {
            guards::initial_status(input.return_status, |s| s == ReturnStatus::Pending)?;
            if let Some(holder_id) = input.holder_id {
                require(repo.employee(holder_id)?, "Employee", holder_id)?;
            }
            if let Some(customer_id) = input.customer_id {
                require(repo.customer(customer_id)?, "Customer", customer_id)?;
            }
            if let Some(order_id) = input.order_id {
                require(repo.order(order_id)?, "Order", order_id)?;
            }
            if let Some(asset_id) = input.asset_id {
                require(repo.asset(asset_id)?, "Asset", asset_id)?;
            }

            let request = repo.insert_return_request(ReturnRequest::from_input(input, now))?;
            tracing::info!(return_id = request.id, actor = actor.user_id, "Return request opened");
            Ok(request)
        })
    }

    /// Move a return to any status; no ordering between states is enforced.
    pub fn set_return_status(
        &self,
        actor: &Actor,
        return_id: DbId,
        status: ReturnStatus,
    ) -> Result<ReturnRequest, RuleError> {
        self.update_return(return_id, |request| {
            tracing::info!(return_id, from = %request.return_status, to = %status, actor = actor.user_id, "Return status changed");
            request.return_status = status;
        })
    }

    /// Independent of the return status.
    pub fn mark_label_generated(&self, actor: &Actor, return_id: DbId) -> Result<ReturnRequest, RuleError> {
        self.update_return(return_id, |request| {
            tracing::info!(return_id, actor = actor.user_id, "Prepaid label generated");
            request.prepaid_label_generated = true;
        })
    }

    /// Independent of the return status.
    pub fn confirm_final_status(&self, actor: &Actor, return_id: DbId) -> Result<ReturnRequest, RuleError> {
        self.update_return(return_id, |request| {
            tracing::info!(return_id, actor = actor.user_id, "Return final status confirmed");
            request.final_status_confirmed = true;
        })
    }

    fn update_return(
        &self,
        return_id: DbId,
        change: impl FnOnce(&mut ReturnRequest),
    ) -> Result<ReturnRequest, RuleError> {
        self.transact(|repo, _| {
            let mut request = require(repo.return_request(return_id)?, "ReturnRequest", return_id)?;
            change(&mut request);
            repo.save_return_request(&request)?;
            Ok(request)
        })
    }
}
