//! Recent-event journal.
//!
//! [`EventJournal`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! keeps the last `capacity` events it received. It runs as a long-lived
//! background task and stops when the bus is dropped.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

pub struct EventJournal {
    capacity: usize,
    entries: Mutex<VecDeque<PlatformEvent>>,
}

impl EventJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Record events from `receiver` until the channel closes.
    pub async fn run(&self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.record(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event journal lagged, some events were not recorded");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, journal shutting down");
                    break;
                }
            }
        }
    }

    pub fn record(&self, event: PlatformEvent) {
        let Ok(mut entries) = self.entries.lock() else {
            tracing::error!(event_type = %event.event_type, "Event journal lock poisoned");
            return;
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Up to `limit` most recent events, newest first.
    pub fn recent(&self, limit: usize) -> Vec<PlatformEvent> {
        self.after(0, limit)
    }

    /// Up to `limit` most recent events with a sequence above `sequence`,
    /// newest first.
    pub fn after(&self, sequence: u64, limit: usize) -> Vec<PlatformEvent> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .rev()
                    .filter(|e| e.sequence > sequence)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
