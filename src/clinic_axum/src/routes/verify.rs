use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use clinic_application::{VerifyAccountUseCase, VerifyNewEmailUseCase};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(default)]
    pub token: String,
}

/// `GET /api/verify?token=` - account activation from the emailed link.
/// Responds 200 with an empty body so the link works from any mail client.
#[tracing::instrument(name = "Verify account", skip_all)]
pub async fn verify_account(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = VerifyAccountUseCase::new(state.tokens.clone(), state.users.clone());
    use_case.execute(&query.token).await?;

    Ok(StatusCode::OK)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedResponse {
    pub updated: String,
}

/// `GET /api/users/verify-email?token=` - applies a pending email change.
#[tracing::instrument(name = "Verify new email", skip_all)]
pub async fn verify_new_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = VerifyNewEmailUseCase::new(state.tokens.clone(), state.users.clone());
    use_case.execute(&query.token).await?;

    Ok(Json(UpdatedResponse {
        updated: "successfully".to_owned(),
    }))
}
