use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use clinic_core::{AuditStoreError, LoginAuditStore};

#[derive(Clone)]
pub struct PostgresAuditStore {
    pool: PgPool,
}

impl PostgresAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginAuditStore for PostgresAuditStore {
    #[tracing::instrument(name = "Recording login attempt", skip_all)]
    async fn record_attempt(
        &self,
        user_id: Option<Uuid>,
        source_ip: &str,
        success: bool,
    ) -> Result<(), AuditStoreError> {
        sqlx::query(
            r#"
                INSERT INTO login_logs (user_id, ip_address, success)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(source_ip)
        .bind(success)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
