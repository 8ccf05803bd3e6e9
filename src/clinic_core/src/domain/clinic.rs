use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DomainError;

/// A clinic listing.
#[derive(Debug, Clone)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a clinic. Name and phone are
/// mandatory; everything else defaults to empty.
#[derive(Debug, Clone)]
pub struct NewClinic {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

impl NewClinic {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::MissingField("clinic name"));
        }
        if self.phone.is_empty() {
            return Err(DomainError::MissingField("clinic phone"));
        }
        Ok(())
    }
}

/// Link row of the clinic/address many-to-many relation.
#[derive(Debug, Clone)]
pub struct ClinicAddress {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub address_id: Uuid,
    pub is_main: bool,
}
