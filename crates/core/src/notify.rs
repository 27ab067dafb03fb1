//! Notification collaborator.
//!
//! Rule operations describe what happened as [`DomainEvent`]s and hand them
//! to a [`Notifier`] once their unit of work has committed. Delivery is
//! fire-and-forget: a notifier never fails the operation that produced the
//! event.

use std::sync::Mutex;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Published event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventName {
    #[serde(rename = "stock.low")]
    StockLow,
    #[serde(rename = "procurement.request_created")]
    ProcurementRequestCreated,
    #[serde(rename = "assignment.updated")]
    AssignmentUpdated,
    #[serde(rename = "service.status_updated")]
    ServiceStatusUpdated,
    #[serde(rename = "quotation.received")]
    QuotationReceived,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StockLow => "stock.low",
            Self::ProcurementRequestCreated => "procurement.request_created",
            Self::AssignmentUpdated => "assignment.updated",
            Self::ServiceStatusUpdated => "service.status_updated",
            Self::QuotationReceived => "quotation.received",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened to one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub name: EventName,
    /// Record kind, e.g. `"BufferStock"`.
    pub entity: &'static str,
    pub entity_id: DbId,
    pub actor_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl DomainEvent {
    pub fn new(name: EventName, entity: &'static str, entity_id: DbId, occurred_at: Timestamp) -> Self {
        Self {
            name,
            entity,
            entity_id,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            occurred_at,
        }
    }

    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

pub trait Notifier: Send + Sync {
    fn publish(&self, event: DomainEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn publish(&self, _event: DomainEvent) {}
}

/// Keeps every event in memory, for assertions.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    events: Mutex<Vec<DomainEvent>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of the events published so far, in order.
    pub fn names(&self) -> Vec<EventName> {
        self.events().iter().map(|e| e.name).collect()
    }

    pub fn count(&self, name: EventName) -> usize {
        self.events().iter().filter(|e| e.name == name).count()
    }
}

impl Notifier for CollectingNotifier {
    fn publish(&self, event: DomainEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
