use std::sync::Arc;

use clinic_core::{TokenStoreError, UserStore, UserStoreError, VerificationTokenStore};

#[derive(Debug, thiserror::Error)]
pub enum VerifyAccountError {
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid or expired token")]
    ExpiredToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<TokenStoreError> for VerifyAccountError {
    fn from(error: TokenStoreError) -> Self {
        match error {
            TokenStoreError::TokenNotFound => VerifyAccountError::InvalidToken,
            TokenStoreError::TokenExpired => VerifyAccountError::ExpiredToken,
            TokenStoreError::UnexpectedError(e) => VerifyAccountError::UnexpectedError(e),
        }
    }
}

/// Verify account use case - redeems an activation token and flips the
/// verified flag.
pub struct VerifyAccountUseCase {
    tokens: Arc<dyn VerificationTokenStore>,
    users: Arc<dyn UserStore>,
}

impl VerifyAccountUseCase {
    pub fn new(tokens: Arc<dyn VerificationTokenStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    #[tracing::instrument(name = "VerifyAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<(), VerifyAccountError> {
        let user_id = self.tokens.redeem_account_token(token).await?;

        match self.users.mark_verified(user_id).await {
            Ok(()) => Ok(()),
            // Account deleted between issuance and redemption.
            Err(UserStoreError::UserNotFound) => Err(VerifyAccountError::InvalidToken),
            Err(e) => Err(VerifyAccountError::UnexpectedError(e.to_string())),
        }
    }
}
