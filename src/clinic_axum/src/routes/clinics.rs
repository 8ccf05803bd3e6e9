use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_application::ClinicsUseCase;
use clinic_core::{Clinic, ClinicAddress, NewClinic};

use crate::{error::ApiError, routes::users::MessageResponse, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ClinicBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
}

impl From<ClinicBody> for NewClinic {
    fn from(body: ClinicBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            phone: body.phone,
            email: body.email,
            website: body.website,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClinicResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Clinic> for ClinicResponse {
    fn from(clinic: Clinic) -> Self {
        Self {
            id: clinic.id,
            name: clinic.name,
            description: clinic.description,
            phone: clinic.phone,
            email: clinic.email,
            website: clinic.website,
            is_active: clinic.is_active,
            created_at: clinic.created_at,
        }
    }
}

#[tracing::instrument(name = "Create clinic", skip_all)]
pub async fn create_clinic(
    State(state): State<AppState>,
    Json(body): Json<ClinicBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    let clinic = use_case.create(body.into()).await?;

    Ok(Json(ClinicResponse::from(clinic)))
}

#[tracing::instrument(name = "List clinics", skip_all)]
pub async fn list_clinics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    let clinics = use_case.list().await?;

    Ok(Json(
        clinics
            .into_iter()
            .map(ClinicResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[tracing::instrument(name = "Get clinic", skip_all, fields(clinic_id = %id))]
pub async fn get_clinic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    let clinic = use_case.get(id).await?;

    Ok(Json(ClinicResponse::from(clinic)))
}

#[tracing::instrument(name = "Update clinic", skip_all, fields(clinic_id = %id))]
pub async fn update_clinic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ClinicBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    let clinic = use_case.update(id, body.into()).await?;

    Ok(Json(ClinicResponse::from(clinic)))
}

#[tracing::instrument(name = "Delete clinic", skip_all, fields(clinic_id = %id))]
pub async fn delete_clinic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    use_case.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Clinic deleted successfully".to_owned(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LinkAddressBody {
    pub address_id: Uuid,
    #[serde(default)]
    pub is_main: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClinicAddressResponse {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub address_id: Uuid,
    pub is_main: bool,
}

impl From<ClinicAddress> for ClinicAddressResponse {
    fn from(link: ClinicAddress) -> Self {
        Self {
            id: link.id,
            clinic_id: link.clinic_id,
            address_id: link.address_id,
            is_main: link.is_main,
        }
    }
}

#[tracing::instrument(name = "Link clinic address", skip_all, fields(clinic_id = %id))]
pub async fn add_clinic_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<LinkAddressBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    use_case.add_address(id, body.address_id, body.is_main).await?;

    Ok(Json(MessageResponse {
        message: "Address linked successfully".to_owned(),
    }))
}

#[tracing::instrument(name = "List clinic addresses", skip_all, fields(clinic_id = %id))]
pub async fn list_clinic_addresses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ClinicsUseCase::new(state.clinics.clone(), state.addresses.clone());
    let links = use_case.addresses(id).await?;

    Ok(Json(
        links
            .into_iter()
            .map(ClinicAddressResponse::from)
            .collect::<Vec<_>>(),
    ))
}
