use std::sync::Arc;

use secrecy::Secret;
use uuid::Uuid;

use clinic_core::{
    CredentialHasher, Email, LoginAuditStore, User, UserStore, UserStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Uniform failure for unknown email, wrong password and unverified
    /// accounts alike, so responses never reveal which one it was.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Login use case - authenticates a verified account and records the
/// attempt in the audit log.
pub struct LoginUseCase {
    users: Arc<dyn UserStore>,
    audit: Arc<dyn LoginAuditStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        audit: Arc<dyn LoginAuditStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            users,
            audit,
            hasher,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all, fields(ip = %source_ip))]
    pub async fn execute(
        &self,
        email: String,
        password: Secret<String>,
        source_ip: &str,
    ) -> Result<User, LoginError> {
        if email.is_empty() {
            self.record(None, source_ip, false).await;
            return Err(LoginError::InvalidCredentials);
        }

        let email = match Email::parse(email) {
            Ok(email) => email,
            Err(_) => {
                self.record(None, source_ip, false).await;
                return Err(LoginError::InvalidCredentials);
            }
        };

        // Unverified accounts are filtered out by the lookup itself.
        let user = match self.users.find_verified_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                self.record(None, source_ip, false).await;
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::UnexpectedError(e.to_string())),
        };

        let valid = self
            .hasher
            .verify(&password, &user.password_hash)
            .await
            .map_err(|e| LoginError::UnexpectedError(e.to_string()))?;

        if !valid {
            self.record(Some(user.id), source_ip, false).await;
            return Err(LoginError::InvalidCredentials);
        }

        self.record(Some(user.id), source_ip, true).await;
        Ok(user)
    }

    /// Audit writes must never fail the login itself.
    async fn record(&self, user_id: Option<Uuid>, ip: &str, success: bool) {
        if let Err(e) = self.audit.record_attempt(user_id, ip, success).await {
            tracing::warn!(error = %e, "login audit write failed");
        }
    }
}
