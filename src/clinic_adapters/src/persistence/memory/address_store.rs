use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{Address, AddressStore, AddressStoreError, NewAddress};

#[derive(Clone, Default)]
pub struct InMemoryAddressStore {
    addresses: Arc<RwLock<HashMap<Uuid, Address>>>,
}

impl InMemoryAddressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressStore for InMemoryAddressStore {
    async fn create(&self, address: NewAddress) -> Result<Address, AddressStoreError> {
        let address = Address {
            id: Uuid::new_v4(),
            country: address.country,
            city: address.city,
            street: address.street,
            building: address.building,
            latitude: address.latitude,
            longitude: address.longitude,
        };
        self.addresses
            .write()
            .await
            .insert(address.id, address.clone());
        Ok(address)
    }

    async fn get(&self, id: Uuid) -> Result<Address, AddressStoreError> {
        self.addresses
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AddressStoreError::AddressNotFound)
    }

    async fn list(&self) -> Result<Vec<Address>, AddressStoreError> {
        Ok(self.addresses.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AddressStoreError> {
        self.addresses
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AddressStoreError::AddressNotFound)
    }
}
