use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use clinic_core::{Address, AddressStore, AddressStoreError, NewAddress};

const ADDRESS_COLUMNS: &str = "id, country, city, street, building, latitude, longitude";

#[derive(Clone)]
pub struct PostgresAddressStore {
    pool: PgPool,
}

impl PostgresAddressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn address_from_row(row: &PgRow) -> Result<Address, AddressStoreError> {
    let read = |e: sqlx::Error| AddressStoreError::UnexpectedError(e.to_string());
    Ok(Address {
        id: row.try_get("id").map_err(read)?,
        country: row.try_get("country").map_err(read)?,
        city: row.try_get("city").map_err(read)?,
        street: row.try_get("street").map_err(read)?,
        building: row.try_get("building").map_err(read)?,
        latitude: row.try_get("latitude").map_err(read)?,
        longitude: row.try_get("longitude").map_err(read)?,
    })
}

#[async_trait]
impl AddressStore for PostgresAddressStore {
    #[tracing::instrument(name = "Creating address in PostgreSQL", skip_all)]
    async fn create(&self, address: NewAddress) -> Result<Address, AddressStoreError> {
        let query = format!(
            r#"
                INSERT INTO addresses (id, country, city, street, building, latitude, longitude)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ADDRESS_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&address.country)
            .bind(&address.city)
            .bind(&address.street)
            .bind(&address.building)
            .bind(address.latitude)
            .bind(address.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AddressStoreError::UnexpectedError(e.to_string()))?;

        address_from_row(&row)
    }

    #[tracing::instrument(name = "Fetching address from PostgreSQL", skip_all)]
    async fn get(&self, address_id: Uuid) -> Result<Address, AddressStoreError> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(address_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AddressStoreError::UnexpectedError(e.to_string()))?
            .ok_or(AddressStoreError::AddressNotFound)?;

        address_from_row(&row)
    }

    #[tracing::instrument(name = "Listing addresses from PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<Address>, AddressStoreError> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses ORDER BY city, street");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AddressStoreError::UnexpectedError(e.to_string()))?;

        rows.iter().map(address_from_row).collect()
    }

    #[tracing::instrument(name = "Deleting address from PostgreSQL", skip_all)]
    async fn delete(&self, address_id: Uuid) -> Result<(), AddressStoreError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(address_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AddressStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AddressStoreError::AddressNotFound);
        }

        Ok(())
    }
}
