use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use clinic_core::{
    AddressStore, AddressStoreError, Clinic, ClinicAddress, ClinicStore, ClinicStoreError,
    DomainError, NewClinic,
};

#[derive(Debug, thiserror::Error)]
pub enum ClinicsError {
    #[error("{0}")]
    Validation(#[from] DomainError),
    #[error("Clinic not found")]
    NotFound,
    #[error("Address not found")]
    AddressNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<ClinicStoreError> for ClinicsError {
    fn from(error: ClinicStoreError) -> Self {
        match error {
            ClinicStoreError::ClinicNotFound => ClinicsError::NotFound,
            ClinicStoreError::UnexpectedError(e) => ClinicsError::UnexpectedError(e),
        }
    }
}

/// Clinic use case - listing CRUD plus the clinic/address relation.
pub struct ClinicsUseCase {
    clinics: Arc<dyn ClinicStore>,
    addresses: Arc<dyn AddressStore>,
}

impl ClinicsUseCase {
    pub fn new(clinics: Arc<dyn ClinicStore>, addresses: Arc<dyn AddressStore>) -> Self {
        Self { clinics, addresses }
    }

    #[tracing::instrument(name = "ClinicsUseCase::create", skip_all)]
    pub async fn create(&self, new_clinic: NewClinic) -> Result<Clinic, ClinicsError> {
        new_clinic.validate()?;

        let clinic = Clinic {
            id: Uuid::new_v4(),
            name: new_clinic.name,
            description: new_clinic.description,
            phone: new_clinic.phone,
            email: new_clinic.email,
            website: new_clinic.website,
            is_active: true,
            created_at: Utc::now(),
        };

        Ok(self.clinics.create(clinic).await?)
    }

    pub async fn list(&self) -> Result<Vec<Clinic>, ClinicsError> {
        Ok(self.clinics.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Clinic, ClinicsError> {
        Ok(self.clinics.get(id).await?)
    }

    /// Replaces the mutable fields; `created_at` and `is_active` are kept
    /// from the stored row.
    #[tracing::instrument(name = "ClinicsUseCase::update", skip_all, fields(clinic_id = %id))]
    pub async fn update(&self, id: Uuid, new_clinic: NewClinic) -> Result<Clinic, ClinicsError> {
        new_clinic.validate()?;

        let existing = self.clinics.get(id).await?;
        let clinic = Clinic {
            id,
            name: new_clinic.name,
            description: new_clinic.description,
            phone: new_clinic.phone,
            email: new_clinic.email,
            website: new_clinic.website,
            is_active: existing.is_active,
            created_at: existing.created_at,
        };

        Ok(self.clinics.update(clinic).await?)
    }

    #[tracing::instrument(name = "ClinicsUseCase::delete", skip_all, fields(clinic_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ClinicsError> {
        Ok(self.clinics.delete(id).await?)
    }

    /// Links an existing address to a clinic.
    #[tracing::instrument(name = "ClinicsUseCase::add_address", skip_all, fields(clinic_id = %clinic_id))]
    pub async fn add_address(
        &self,
        clinic_id: Uuid,
        address_id: Uuid,
        is_main: bool,
    ) -> Result<(), ClinicsError> {
        self.clinics.get(clinic_id).await?;
        match self.addresses.get(address_id).await {
            Ok(_) => {}
            Err(AddressStoreError::AddressNotFound) => return Err(ClinicsError::AddressNotFound),
            Err(e) => return Err(ClinicsError::UnexpectedError(e.to_string())),
        }

        let link = ClinicAddress {
            id: Uuid::new_v4(),
            clinic_id,
            address_id,
            is_main,
        };
        Ok(self.clinics.add_address(link).await?)
    }

    pub async fn addresses(&self, clinic_id: Uuid) -> Result<Vec<ClinicAddress>, ClinicsError> {
        self.clinics.get(clinic_id).await?;
        Ok(self.clinics.addresses(clinic_id).await?)
    }
}
