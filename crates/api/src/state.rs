use std::sync::Arc;

use fleetkeep_core::rules::RuleEngine;
use fleetkeep_db::MemoryStore;
use fleetkeep_events::{EventBus, EventJournal};
use tokio::task::JoinHandle;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub config: Arc<ServerConfig>,
    /// Rule operations publish their events here.
    pub event_bus: Arc<EventBus>,
    /// Recent events, fed by a subscriber of `event_bus`.
    pub journal: Arc<EventJournal>,
}

impl AppState {
    /// Fresh empty store plus a bus and journal sized from `config`.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            event_bus: Arc::new(EventBus::new(config.event_bus_capacity)),
            journal: Arc::new(EventJournal::new(config.event_bus_capacity)),
            config: Arc::new(config),
        }
    }

    /// A rule engine bound to the store and the event bus.
    pub fn engine(&self) -> RuleEngine<'_, MemoryStore> {
        RuleEngine::new(self.store.as_ref(), self.event_bus.as_ref())
    }

    /// Start feeding the journal from the bus. The task ends when the bus is
    /// dropped.
    pub fn spawn_journal(&self) -> JoinHandle<()> {
        let journal = Arc::clone(&self.journal);
        let receiver = self.event_bus.subscribe();
        tokio::spawn(async move { journal.run(receiver).await })
    }
}
