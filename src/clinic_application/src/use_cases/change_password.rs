use std::sync::Arc;

use secrecy::Secret;
use uuid::Uuid;

use clinic_core::{CredentialHasher, EmailClient, Password, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("weak password")]
    WeakPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Change password use case - re-verifies the old credential before
/// accepting the new one.
///
/// The caller identity comes from verified bearer-token claims, never
/// from the request body.
pub struct ChangePasswordUseCase {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    email_client: Arc<dyn EmailClient>,
}

impl ChangePasswordUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
        email_client: Arc<dyn EmailClient>,
    ) -> Self {
        Self {
            users,
            hasher,
            email_client,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all, fields(user_id = %user_id))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: Secret<String>,
        new_password: Secret<String>,
    ) -> Result<(), ChangePasswordError> {
        let user = match self.users.get_user(user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(ChangePasswordError::InvalidCredentials),
            Err(e) => return Err(ChangePasswordError::UnexpectedError(e.to_string())),
        };

        let valid = self
            .hasher
            .verify(&old_password, &user.password_hash)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;
        if !valid {
            return Err(ChangePasswordError::InvalidCredentials);
        }

        // New password goes through the same strength policy as registration.
        let new_password =
            Password::parse(new_password).map_err(|_| ChangePasswordError::WeakPassword)?;

        let password_hash = self
            .hasher
            .hash(&new_password)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;

        self.users
            .set_password_hash(user_id, password_hash)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;

        self.email_client
            .send_email(
                &user.email,
                "You have updated your Password",
                "You have updated your Password",
            )
            .await
            .map_err(ChangePasswordError::UnexpectedError)?;

        Ok(())
    }
}
