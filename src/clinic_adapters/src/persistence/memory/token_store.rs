use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{Email, TokenStoreError, VerificationTokenStore};

struct AccountToken {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

struct EmailChangeToken {
    user_id: Uuid,
    new_email: Email,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

/// Consume-once semantics are kept under a single write guard, matching
/// the conditional `UPDATE` the Postgres store performs.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    account: Arc<RwLock<HashMap<String, AccountToken>>>,
    email_change: Arc<RwLock<HashMap<String, EmailChangeToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationTokenStore for InMemoryTokenStore {
    async fn save_account_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        self.account.write().await.insert(
            token.to_owned(),
            AccountToken {
                user_id,
                expires_at,
                consumed: false,
            },
        );
        Ok(())
    }

    async fn redeem_account_token(&self, token: &str) -> Result<Uuid, TokenStoreError> {
        let mut tokens = self.account.write().await;
        let entry = tokens.get_mut(token).ok_or(TokenStoreError::TokenNotFound)?;
        if entry.consumed {
            return Err(TokenStoreError::TokenNotFound);
        }
        if entry.expires_at <= Utc::now() {
            return Err(TokenStoreError::TokenExpired);
        }
        entry.consumed = true;
        Ok(entry.user_id)
    }

    async fn save_email_change_token(
        &self,
        user_id: Uuid,
        new_email: &Email,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        self.email_change.write().await.insert(
            token.to_owned(),
            EmailChangeToken {
                user_id,
                new_email: new_email.clone(),
                expires_at,
                consumed: false,
            },
        );
        Ok(())
    }

    async fn redeem_email_change_token(
        &self,
        token: &str,
    ) -> Result<(Uuid, Email), TokenStoreError> {
        let mut tokens = self.email_change.write().await;
        let entry = tokens.get_mut(token).ok_or(TokenStoreError::TokenNotFound)?;
        if entry.consumed {
            return Err(TokenStoreError::TokenNotFound);
        }
        if entry.expires_at <= Utc::now() {
            return Err(TokenStoreError::TokenExpired);
        }
        entry.consumed = true;
        Ok((entry.user_id, entry.new_email.clone()))
    }
}
