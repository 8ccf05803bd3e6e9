use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_application::AddressesUseCase;
use clinic_core::{Address, NewAddress};

use crate::{error::ApiError, routes::users::MessageResponse, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AddressBody {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub street: String,
    pub building: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            country: address.country,
            city: address.city,
            street: address.street,
            building: address.building,
            latitude: address.latitude,
            longitude: address.longitude,
        }
    }
}

#[tracing::instrument(name = "Create address", skip_all)]
pub async fn create_address(
    State(state): State<AppState>,
    Json(body): Json<AddressBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = AddressesUseCase::new(state.addresses.clone());
    let address = use_case
        .create(NewAddress {
            country: body.country,
            city: body.city,
            street: body.street,
            building: body.building,
            latitude: body.latitude,
            longitude: body.longitude,
        })
        .await?;

    Ok(Json(AddressResponse::from(address)))
}

#[tracing::instrument(name = "List addresses", skip_all)]
pub async fn list_addresses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let use_case = AddressesUseCase::new(state.addresses.clone());
    let addresses = use_case.list().await?;

    Ok(Json(
        addresses
            .into_iter()
            .map(AddressResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[tracing::instrument(name = "Get address", skip_all, fields(address_id = %id))]
pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = AddressesUseCase::new(state.addresses.clone());
    let address = use_case.get(id).await?;

    Ok(Json(AddressResponse::from(address)))
}

#[tracing::instrument(name = "Delete address", skip_all, fields(address_id = %id))]
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = AddressesUseCase::new(state.addresses.clone());
    use_case.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Address deleted successfully".to_owned(),
    }))
}
