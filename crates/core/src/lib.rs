//! fleetkeep core: input validation and business rules for equipment
//! management.
//!
//! - [`validation`] is the pure schema layer. It turns a raw JSON record into
//!   a typed input or the complete list of field violations.
//! - [`rules`] is the business rule layer. It checks cross-entity guards
//!   through the [`store::DataAccess`] collaborator and publishes events
//!   through the [`notify::Notifier`] collaborator.

pub mod error;
pub mod model;
pub mod notify;
pub mod rules;
pub mod status;
pub mod store;
pub mod types;
pub mod validation;
