use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use clinic_core::{Email, TokenStoreError, VerificationTokenStore};

/// Postgres-backed verification tokens.
///
/// Redemption is a single conditional `UPDATE ... RETURNING`: the row is
/// marked consumed in the same statement that reads it, so two concurrent
/// redemptions of one token cannot both succeed.
#[derive(Clone)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguishes "expired" from "unknown or replayed" for a failed
    /// redemption, purely for the error variant.
    async fn classify_miss(&self, table: &str, token: &str) -> TokenStoreError {
        let query = format!(
            "SELECT expires_at <= NOW() AS expired FROM {table} WHERE token = $1 AND consumed_at IS NULL"
        );
        match sqlx::query(&query).bind(token).fetch_optional(&self.pool).await {
            Ok(Some(row)) if row.try_get("expired").unwrap_or(false) => {
                TokenStoreError::TokenExpired
            }
            Ok(_) => TokenStoreError::TokenNotFound,
            Err(e) => TokenStoreError::UnexpectedError(e.to_string()),
        }
    }
}

#[async_trait]
impl VerificationTokenStore for PostgresTokenStore {
    #[tracing::instrument(name = "Saving account verification token", skip_all)]
    async fn save_account_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO verification_tokens (user_id, token, expires_at)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Redeeming account verification token", skip_all)]
    async fn redeem_account_token(&self, token: &str) -> Result<Uuid, TokenStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE verification_tokens
                SET consumed_at = NOW()
                WHERE token = $1 AND consumed_at IS NULL AND expires_at > NOW()
                RETURNING user_id
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        match row {
            Some(row) => row
                .try_get("user_id")
                .map_err(|e| TokenStoreError::UnexpectedError(e.to_string())),
            None => Err(self.classify_miss("verification_tokens", token).await),
        }
    }

    #[tracing::instrument(name = "Saving email change token", skip_all)]
    async fn save_email_change_token(
        &self,
        user_id: Uuid,
        new_email: &Email,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO email_change_tokens (user_id, new_email, token, expires_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(new_email.as_str())
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Redeeming email change token", skip_all)]
    async fn redeem_email_change_token(
        &self,
        token: &str,
    ) -> Result<(Uuid, Email), TokenStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE email_change_tokens
                SET consumed_at = NOW()
                WHERE token = $1 AND consumed_at IS NULL AND expires_at > NOW()
                RETURNING user_id, new_email
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        match row {
            Some(row) => {
                let user_id: Uuid = row
                    .try_get("user_id")
                    .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;
                let new_email: String = row
                    .try_get("new_email")
                    .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;
                let new_email = Email::parse(new_email)
                    .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;
                Ok((user_id, new_email))
            }
            None => Err(self.classify_miss("email_change_tokens", token).await),
        }
    }
}
