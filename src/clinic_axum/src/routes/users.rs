use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_application::{
    ChangeEmailUseCase, ChangePasswordUseCase, DeleteAccountUseCase, ProfileUseCase,
    UpdateProfileRequest,
};
use clinic_core::{AuthClaims, Role, User};

use crate::{error::ApiError, routes::verify::UpdatedResponse, state::AppState};

/// Wire shape of an account. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
    pub is_verified: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            email: user.email.as_str().to_owned(),
            name: user.name.as_str().to_owned(),
            gender: user.gender,
            age: user.age,
            push_consent: user.push_consent,
            is_verified: user.is_verified,
        }
    }
}

#[tracing::instrument(name = "Get user", skip_all, fields(user_id = %id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ProfileUseCase::new(state.users.clone());
    let user = use_case.get(id).await?;

    Ok(Json(UserResponse::from(user)))
}

#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let use_case = ProfileUseCase::new(state.users.clone());
    let users = use_case.list().await?;

    Ok(Json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    pub role: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub push_consent: bool,
}

#[tracing::instrument(name = "Update user", skip_all, fields(user_id = %id))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ProfileUseCase::new(state.users.clone());
    let user = use_case
        .update(
            id,
            UpdateProfileRequest {
                role: body.role,
                email: body.email,
                name: body.name,
                gender: body.gender,
                age: body.age,
                push_consent: body.push_consent,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[tracing::instrument(name = "Delete user", skip_all, fields(user_id = %id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = DeleteAccountUseCase::new(state.users.clone());
    use_case.execute(id, &claims).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_owned(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordBody {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
}

/// Caller identity comes from the verified claims, never from the body.
#[tracing::instrument(name = "Update password", skip_all)]
pub async fn update_password(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Json(body): Json<UpdatePasswordBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ChangePasswordUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.email_client.clone(),
    );
    use_case
        .execute(claims.sub, body.old_password, body.new_password)
        .await?;

    Ok(Json(UpdatedResponse {
        updated: "successfully".to_owned(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmailBody {
    pub new_email: String,
}

#[tracing::instrument(name = "Update email", skip_all)]
pub async fn update_email(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Json(body): Json<UpdateEmailBody>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ChangeEmailUseCase::new(
        state.tokens.clone(),
        state.email_client.clone(),
        state.public_base_url.clone(),
        state.verification_token_ttl,
    );
    use_case.execute(claims.sub, body.new_email).await?;

    Ok(Json(MessageResponse {
        message: "confirmation email sent".to_owned(),
    }))
}
