use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::password::Password;

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Slow, salted one-way credential hashing.
///
/// `hash` produces a fresh salt per call, so equal inputs yield different
/// outputs. `verify` answers false on mismatch and only errors on internal
/// failure, never on a wrong password.
///
/// `verify` takes the raw secret rather than a parsed [`Password`]: the
/// strength policy applies when credentials are set, not when they are
/// checked.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError>;
    async fn verify(
        &self,
        candidate: &Secret<String>,
        password_hash: &Secret<String>,
    ) -> Result<bool, HasherError>;
}
