use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_application::{RegisterRequest, RegisterUseCase};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub role: String,
    pub email: String,
    pub password: Secret<String>,
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub push_consent: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: String,
    pub message: String,
    pub user_id: Uuid,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = RegisterUseCase::new(
        state.users.clone(),
        state.tokens.clone(),
        state.email_client.clone(),
        state.hasher.clone(),
        state.public_base_url.clone(),
        state.verification_token_ttl,
    );

    let user = use_case
        .execute(RegisterRequest {
            role: body.role,
            email: body.email,
            password: body.password,
            name: body.name,
            gender: body.gender,
            age: body.age,
            push_consent: body.push_consent,
        })
        .await?;

    Ok(Json(RegisterResponse {
        success: "1".to_owned(),
        message: "successfully created".to_owned(),
        user_id: user.id,
    }))
}
