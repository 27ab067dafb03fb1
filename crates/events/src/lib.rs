//! fleetkeep event bus.
//!
//! - [`EventBus`] is an in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. It implements the core's
//!   [`Notifier`](fleetkeep_core::notify::Notifier), so rule operations can
//!   publish straight onto it.
//! - [`PlatformEvent`] is the envelope subscribers receive.
//! - [`EventJournal`] is a background subscriber that keeps the most recent
//!   events in memory for inspection.

pub mod bus;
pub mod journal;

pub use bus::{EventBus, PlatformEvent, DEFAULT_CAPACITY};
pub use journal::EventJournal;
