use std::sync::Arc;

use uuid::Uuid;

use clinic_core::{Address, AddressStore, AddressStoreError, NewAddress};

#[derive(Debug, thiserror::Error)]
pub enum AddressesError {
    #[error("Address not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<AddressStoreError> for AddressesError {
    fn from(error: AddressStoreError) -> Self {
        match error {
            AddressStoreError::AddressNotFound => AddressesError::NotFound,
            AddressStoreError::UnexpectedError(e) => AddressesError::UnexpectedError(e),
        }
    }
}

/// Address use case - thin CRUD over the address store.
pub struct AddressesUseCase {
    addresses: Arc<dyn AddressStore>,
}

impl AddressesUseCase {
    pub fn new(addresses: Arc<dyn AddressStore>) -> Self {
        Self { addresses }
    }

    #[tracing::instrument(name = "AddressesUseCase::create", skip_all)]
    pub async fn create(&self, address: NewAddress) -> Result<Address, AddressesError> {
        Ok(self.addresses.create(address).await?)
    }

    pub async fn list(&self) -> Result<Vec<Address>, AddressesError> {
        Ok(self.addresses.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Address, AddressesError> {
        Ok(self.addresses.get(id).await?)
    }

    #[tracing::instrument(name = "AddressesUseCase::delete", skip_all, fields(address_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AddressesError> {
        Ok(self.addresses.delete(id).await?)
    }
}
