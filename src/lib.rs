//! Clinic management backend.
//!
//! Re-exports the workspace crates so the whole service can be consumed
//! through a single dependency:
//!
//! - [`clinic_core`] - domain types, port traits, strategy traits
//! - [`clinic_application`] - use cases orchestrating the ports
//! - [`clinic_adapters`] - Postgres/in-memory stores, Argon2 hasher, JWT
//!   issuer, email clients, settings
//! - [`clinic_axum`] - HTTP routes, auth guard, API error mapping
//! - [`clinic_service`] - composition root and server runner

pub use clinic_adapters as adapters;
pub use clinic_application as application;
pub use clinic_axum as http_api;
pub use clinic_core as core;
pub use clinic_service as service;
