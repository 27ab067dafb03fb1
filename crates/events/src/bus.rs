//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is meant to be shared via `Arc<EventBus>`. Every event it
//! publishes gets the next bus sequence number, so subscribers can tell
//! whether they missed anything.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use fleetkeep_core::notify::{DomainEvent, Notifier};
use fleetkeep_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A [`DomainEvent`] as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEvent {
    /// Position on the bus, starting at 1.
    pub sequence: u64,

    /// Dot-separated event name, e.g. `"stock.low"`.
    pub event_type: String,

    /// Record kind, e.g. `"BufferStock"`.
    pub entity: String,

    pub entity_id: DbId,

    pub actor_id: Option<DbId>,

    pub payload: serde_json::Value,

    pub occurred_at: DateTime<Utc>,
}

impl PlatformEvent {
    pub(crate) fn stamped(sequence: u64, event: DomainEvent) -> Self {
        Self {
            sequence,
            event_type: event.name.as_str().to_string(),
            entity: event.entity.to_string(),
            entity_id: event.entity_id,
            actor_id: event.actor_id,
            payload: event.payload,
            occurred_at: event.occurred_at,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out of rule-layer events.
///
/// ```rust
/// use chrono::Utc;
/// use fleetkeep_core::notify::{DomainEvent, EventName};
/// use fleetkeep_events::EventBus;
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// let seq = bus.publish(DomainEvent::new(EventName::StockLow, "BufferStock", 1, Utc::now()));
/// assert_eq!(seq, 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
    last_sequence: AtomicU64,
}

impl EventBus {
    /// When the buffer is full the oldest undelivered events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            last_sequence: AtomicU64::new(0),
        }
    }

    /// Stamp `event` and send it to every current subscriber. Returns the
    /// sequence number, which is consumed even when nobody is listening.
    pub fn publish(&self, event: DomainEvent) -> u64 {
        let sequence = self.last_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(sequence, event = %event.name, entity_id = event.entity_id, "Event published on bus");
        let _ = self.sender.send(PlatformEvent::stamped(sequence, event));
        sequence
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sequence number of the most recent event, 0 before the first.
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier for EventBus {
    fn publish(&self, event: DomainEvent) {
        EventBus::publish(self, event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fleetkeep_core::notify::EventName;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn stock_low(id: DbId) -> DomainEvent {
        DomainEvent::new(EventName::StockLow, "BufferStock", id, at())
            .with_payload(serde_json::json!({"quantityAvailable": 3}))
    }

    #[tokio::test]
    async fn subscriber_receives_the_stamped_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(stock_low(42).with_actor(7));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.sequence, 1);
        assert_eq!(received.event_type, "stock.low");
        assert_eq!(received.entity, "BufferStock");
        assert_eq!(received.entity_id, 42);
        assert_eq!(received.actor_id, Some(7));
        assert_eq!(received.payload["quantityAvailable"], 3);
        assert_eq!(received.occurred_at, at());
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_same_sequence() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(stock_low(1));
        bus.publish(stock_low(2));

        for rx in [&mut rx1, &mut rx2] {
            let first = rx.recv().await.expect("first event");
            let second = rx.recv().await.expect("second event");
            assert_eq!((first.sequence, second.sequence), (1, 2));
        }
    }

    #[tokio::test]
    async fn rule_layer_publishes_through_the_notifier() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let notifier: &dyn Notifier = &bus;

        notifier.publish(
            DomainEvent::new(EventName::ProcurementRequestCreated, "ProcurementRequest", 5, at())
                .with_actor(2)
                .with_payload(serde_json::json!({"autoGenerated": true})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "procurement.request_created");
        assert_eq!(received.entity_id, 5);
        assert_eq!(received.payload["autoGenerated"], true);
        assert_eq!(bus.last_sequence(), 1);
    }

    #[test]
    fn sequence_advances_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.last_sequence(), 0);
        bus.publish(stock_low(1));
        assert_eq!(bus.publish(stock_low(1)), 2);
    }

    #[test]
    fn events_serialize_in_camel_case() {
        let event = PlatformEvent::stamped(3, stock_low(9));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "stock.low");
        assert_eq!(json["entityId"], 9);
        assert!(json["actorId"].is_null());
        assert_eq!(json["sequence"], 3);
    }
}
