use thiserror::Error;

use crate::domain::{claims::AuthClaims, user::User};

#[derive(Debug, Error)]
pub enum AuthTokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AuthTokenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::TokenExpired, Self::TokenExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Signed bearer token issuance and verification.
///
/// The issuer owns signing-key custody; callers only ever see the encoded
/// token string and the typed claims recovered from it.
pub trait AuthTokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, AuthTokenError>;
    fn verify(&self, token: &str) -> Result<AuthClaims, AuthTokenError>;
}
