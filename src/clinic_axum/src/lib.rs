//! Axum integration for the clinic backend.
//!
//! Route handlers, the shared [`AppState`], the bearer-token auth guard and
//! the error-to-response mapping live here. Handlers stay thin: they parse
//! the wire payload, run a use case from `clinic_application` and shape the
//! response DTO.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;
