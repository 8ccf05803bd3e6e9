use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{AuditStoreError, LoginAuditStore};

#[derive(Debug, Clone, PartialEq)]
pub struct LoginAttempt {
    pub user_id: Option<Uuid>,
    pub ip: String,
    pub success: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryAuditStore {
    attempts: Arc<RwLock<Vec<LoginAttempt>>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn attempts(&self) -> Vec<LoginAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl LoginAuditStore for InMemoryAuditStore {
    async fn record_attempt(
        &self,
        user_id: Option<Uuid>,
        ip: &str,
        success: bool,
    ) -> Result<(), AuditStoreError> {
        self.attempts.write().await.push(LoginAttempt {
            user_id,
            ip: ip.to_owned(),
            success,
        });
        Ok(())
    }
}
