use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use clinic_core::{Clinic, ClinicAddress, ClinicStore, ClinicStoreError};

const CLINIC_COLUMNS: &str =
    "id, name, description, phone, email, website, is_active, created_at";

#[derive(Clone)]
pub struct PostgresClinicStore {
    pool: PgPool,
}

impl PostgresClinicStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn clinic_from_row(row: &PgRow) -> Result<Clinic, ClinicStoreError> {
    let read = |e: sqlx::Error| ClinicStoreError::UnexpectedError(e.to_string());
    Ok(Clinic {
        id: row.try_get("id").map_err(read)?,
        name: row.try_get("name").map_err(read)?,
        description: row.try_get("description").map_err(read)?,
        phone: row.try_get("phone").map_err(read)?,
        email: row.try_get("email").map_err(read)?,
        website: row.try_get("website").map_err(read)?,
        is_active: row.try_get("is_active").map_err(read)?,
        created_at: row.try_get("created_at").map_err(read)?,
    })
}

fn clinic_address_from_row(row: &PgRow) -> Result<ClinicAddress, ClinicStoreError> {
    let read = |e: sqlx::Error| ClinicStoreError::UnexpectedError(e.to_string());
    Ok(ClinicAddress {
        id: row.try_get("id").map_err(read)?,
        clinic_id: row.try_get("clinic_id").map_err(read)?,
        address_id: row.try_get("address_id").map_err(read)?,
        is_main: row.try_get("is_main").map_err(read)?,
    })
}

#[async_trait]
impl ClinicStore for PostgresClinicStore {
    #[tracing::instrument(name = "Creating clinic in PostgreSQL", skip_all)]
    async fn create(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError> {
        let query = format!(
            r#"
                INSERT INTO clinics (id, name, description, phone, email, website, is_active, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {CLINIC_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(clinic.id)
            .bind(&clinic.name)
            .bind(&clinic.description)
            .bind(&clinic.phone)
            .bind(&clinic.email)
            .bind(&clinic.website)
            .bind(clinic.is_active)
            .bind(clinic.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?;

        clinic_from_row(&row)
    }

    #[tracing::instrument(name = "Fetching clinic from PostgreSQL", skip_all)]
    async fn get(&self, clinic_id: Uuid) -> Result<Clinic, ClinicStoreError> {
        let query = format!("SELECT {CLINIC_COLUMNS} FROM clinics WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(clinic_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?
            .ok_or(ClinicStoreError::ClinicNotFound)?;

        clinic_from_row(&row)
    }

    #[tracing::instrument(name = "Listing clinics from PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<Clinic>, ClinicStoreError> {
        let query = format!("SELECT {CLINIC_COLUMNS} FROM clinics ORDER BY created_at");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?;

        rows.iter().map(clinic_from_row).collect()
    }

    #[tracing::instrument(name = "Updating clinic in PostgreSQL", skip_all)]
    async fn update(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError> {
        let query = format!(
            r#"
                UPDATE clinics
                SET name = $2, description = $3, phone = $4, email = $5, website = $6
                WHERE id = $1
                RETURNING {CLINIC_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(clinic.id)
            .bind(&clinic.name)
            .bind(&clinic.description)
            .bind(&clinic.phone)
            .bind(&clinic.email)
            .bind(&clinic.website)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?
            .ok_or(ClinicStoreError::ClinicNotFound)?;

        clinic_from_row(&row)
    }

    #[tracing::instrument(name = "Deleting clinic from PostgreSQL", skip_all)]
    async fn delete(&self, clinic_id: Uuid) -> Result<(), ClinicStoreError> {
        let result = sqlx::query("DELETE FROM clinics WHERE id = $1")
            .bind(clinic_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ClinicStoreError::ClinicNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Linking address to clinic in PostgreSQL", skip_all)]
    async fn add_address(&self, link: ClinicAddress) -> Result<(), ClinicStoreError> {
        sqlx::query(
            r#"
                INSERT INTO clinic_addresses (id, clinic_id, address_id, is_main)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(link.id)
        .bind(link.clinic_id)
        .bind(link.address_id)
        .bind(link.is_main)
        .execute(&self.pool)
        .await
        .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Listing clinic addresses from PostgreSQL", skip_all)]
    async fn addresses(&self, clinic_id: Uuid) -> Result<Vec<ClinicAddress>, ClinicStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT id, clinic_id, address_id, is_main
                FROM clinic_addresses
                WHERE clinic_id = $1
            "#,
        )
        .bind(clinic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClinicStoreError::UnexpectedError(e.to_string()))?;

        rows.iter().map(clinic_address_from_row).collect()
    }
}
