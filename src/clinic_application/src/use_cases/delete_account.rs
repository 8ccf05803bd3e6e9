use std::sync::Arc;

use uuid::Uuid;

use clinic_core::{AuthClaims, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("do not have rights")]
    Forbidden,
    #[error("User not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Delete account use case - allowed for admins and for the account owner.
pub struct DeleteAccountUseCase {
    users: Arc<dyn UserStore>,
}

impl DeleteAccountUseCase {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    #[tracing::instrument(
        name = "DeleteAccountUseCase::execute",
        skip_all,
        fields(target = %target, caller = %caller.sub)
    )]
    pub async fn execute(&self, target: Uuid, caller: &AuthClaims) -> Result<(), DeleteAccountError> {
        if !caller.may_manage(target) {
            return Err(DeleteAccountError::Forbidden);
        }

        match self.users.delete_user(target).await {
            Ok(()) => Ok(()),
            Err(UserStoreError::UserNotFound) => Err(DeleteAccountError::NotFound),
            Err(e) => Err(DeleteAccountError::UnexpectedError(e.to_string())),
        }
    }
}
