pub mod address;
pub mod claims;
pub mod clinic;
pub mod email;
pub mod password;
pub mod person_name;
pub mod role;
pub mod user;

use thiserror::Error;

/// Validation failures for user-supplied fields.
///
/// Messages are stable API surface: they are returned verbatim in error
/// responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid email format")]
    InvalidEmail,
    #[error("weak password")]
    WeakPassword,
    #[error("invalid name")]
    InvalidName,
    #[error("invalid role")]
    InvalidRole,
    #[error("{0} is required")]
    MissingField(&'static str),
}
