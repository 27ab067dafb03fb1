//! Reference Data Access implementation for the fleetkeep core.

pub mod memory;
pub mod table;

pub use memory::{MemoryStore, Tables};
pub use table::{Record, Table};
