use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{Clinic, ClinicAddress, ClinicStore, ClinicStoreError};

#[derive(Clone, Default)]
pub struct InMemoryClinicStore {
    clinics: Arc<RwLock<HashMap<Uuid, Clinic>>>,
    links: Arc<RwLock<Vec<ClinicAddress>>>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClinicStore for InMemoryClinicStore {
    async fn create(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError> {
        self.clinics.write().await.insert(clinic.id, clinic.clone());
        Ok(clinic)
    }

    async fn get(&self, id: Uuid) -> Result<Clinic, ClinicStoreError> {
        self.clinics
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ClinicStoreError::ClinicNotFound)
    }

    async fn list(&self) -> Result<Vec<Clinic>, ClinicStoreError> {
        let mut clinics: Vec<Clinic> = self.clinics.read().await.values().cloned().collect();
        clinics.sort_by_key(|c| c.created_at);
        Ok(clinics)
    }

    async fn update(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError> {
        let mut clinics = self.clinics.write().await;
        let existing = clinics
            .get_mut(&clinic.id)
            .ok_or(ClinicStoreError::ClinicNotFound)?;
        *existing = clinic.clone();
        Ok(clinic)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClinicStoreError> {
        self.clinics
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ClinicStoreError::ClinicNotFound)?;
        self.links.write().await.retain(|l| l.clinic_id != id);
        Ok(())
    }

    async fn add_address(&self, link: ClinicAddress) -> Result<(), ClinicStoreError> {
        self.links.write().await.push(link);
        Ok(())
    }

    async fn addresses(
        &self,
        clinic_id: Uuid,
    ) -> Result<Vec<ClinicAddress>, ClinicStoreError> {
        Ok(self
            .links
            .read()
            .await
            .iter()
            .filter(|l| l.clinic_id == clinic_id)
            .cloned()
            .collect())
    }
}
