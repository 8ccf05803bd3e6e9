use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use clinic_core::{
    DomainError, Email, EmailClient, TokenStoreError, UserStore, UserStoreError,
    VerificationTokenStore,
};

#[derive(Debug, thiserror::Error)]
pub enum ChangeEmailError {
    #[error("{0}")]
    Validation(#[from] DomainError),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<TokenStoreError> for ChangeEmailError {
    fn from(error: TokenStoreError) -> Self {
        ChangeEmailError::UnexpectedError(error.to_string())
    }
}

/// Change email use case - stage one. Issues a token bound to the pending
/// address and mails the confirmation link to that address. The stored
/// email column is untouched until the token is redeemed.
pub struct ChangeEmailUseCase {
    tokens: Arc<dyn VerificationTokenStore>,
    email_client: Arc<dyn EmailClient>,
    public_base_url: String,
    token_ttl: Duration,
}

impl ChangeEmailUseCase {
    pub fn new(
        tokens: Arc<dyn VerificationTokenStore>,
        email_client: Arc<dyn EmailClient>,
        public_base_url: String,
        token_ttl: Duration,
    ) -> Self {
        Self {
            tokens,
            email_client,
            public_base_url,
            token_ttl,
        }
    }

    #[tracing::instrument(name = "ChangeEmailUseCase::execute", skip_all, fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: Uuid, new_email: String) -> Result<(), ChangeEmailError> {
        let new_email = Email::parse(new_email)?;

        let token = Uuid::new_v4().to_string();
        let expires_at = chrono::Utc::now() + self.token_ttl;
        self.tokens
            .save_email_change_token(user_id, &new_email, &token, expires_at)
            .await?;

        let link = format!(
            "{}/api/users/verify-email?token={}",
            self.public_base_url, token
        );
        let content = format!("click to confirm your new email:\n{link}");
        self.email_client
            .send_email(&new_email, "Confirm your new email", &content)
            .await
            .map_err(ChangeEmailError::UnexpectedError)?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyNewEmailError {
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid or expired token")]
    ExpiredToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<TokenStoreError> for VerifyNewEmailError {
    fn from(error: TokenStoreError) -> Self {
        match error {
            TokenStoreError::TokenNotFound => VerifyNewEmailError::InvalidToken,
            TokenStoreError::TokenExpired => VerifyNewEmailError::ExpiredToken,
            TokenStoreError::UnexpectedError(e) => VerifyNewEmailError::UnexpectedError(e),
        }
    }
}

/// Change email use case - stage two. Redeems the token and applies the
/// pending address.
pub struct VerifyNewEmailUseCase {
    tokens: Arc<dyn VerificationTokenStore>,
    users: Arc<dyn UserStore>,
}

impl VerifyNewEmailUseCase {
    pub fn new(tokens: Arc<dyn VerificationTokenStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    #[tracing::instrument(name = "VerifyNewEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<(), VerifyNewEmailError> {
        let (user_id, new_email) = self.tokens.redeem_email_change_token(token).await?;

        match self.users.set_email(user_id, &new_email).await {
            Ok(()) => Ok(()),
            Err(UserStoreError::UserNotFound) => Err(VerifyNewEmailError::InvalidToken),
            Err(e) => Err(VerifyNewEmailError::UnexpectedError(e.to_string())),
        }
    }
}
