//! fleetkeep HTTP API library.
//!
//! Exposes config, state, error handling and routes so the binary entrypoint
//! and the integration tests build the exact same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
