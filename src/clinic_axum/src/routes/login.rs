use std::net::SocketAddr;

use axum::{
    Extension, Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use clinic_application::LoginUseCase;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Source address for the audit log. Proxy header wins over the socket
/// peer; `unknown` when neither is available (as in in-process tests).
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return forwarded.to_owned();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<Extension<ConnectInfo<SocketAddr>>>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
    let ip = client_ip(&headers, peer.map(|Extension(ConnectInfo(addr))| addr));

    let use_case = LoginUseCase::new(state.users.clone(), state.audit.clone(), state.hasher.clone());
    let user = use_case.execute(body.email, body.password, &ip).await?;

    let token = state.token_issuer.issue(&user)?;

    Ok(Json(LoginResponse { token }))
}
