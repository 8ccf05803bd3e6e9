use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

/// Bearer-token guard for the private route tree.
///
/// A missing, non-`Bearer` or empty header is rejected before any token
/// parsing happens, so a malformed header can never panic a handler. On
/// success the verified claims are inserted as a request extension for
/// handlers to read with `Extension<AuthClaims>`.
#[tracing::instrument(name = "Auth guard", skip_all)]
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::MissingToken)?;

    let claims = state.token_issuer.verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
