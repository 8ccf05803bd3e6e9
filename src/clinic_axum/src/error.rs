use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clinic_application::{
    AddressesError, ChangeEmailError, ChangePasswordError, ClinicsError, DeleteAccountError,
    LoginError, ProfileError, RegisterError, VerifyAccountError, VerifyNewEmailError,
};
use clinic_core::AuthTokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Single error type every handler returns. Use-case errors convert into
/// it so status mapping lives in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// Uniform body for every credential failure.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unknown, replayed or expired verification token.
    #[error("Invalid or expired token")]
    InvalidVerificationToken,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("do not have rights")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Internal server error")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::Validation(_)
            | ApiError::InvalidCredentials
            | ApiError::InvalidVerificationToken => StatusCode::BAD_REQUEST,

            ApiError::MissingToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,

            ApiError::Forbidden => StatusCode::FORBIDDEN,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,

            ApiError::UnexpectedError(details) => {
                // Details go to the log only, never into the response body.
                tracing::error!(error = %details, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<AuthTokenError> for ApiError {
    fn from(error: AuthTokenError) -> Self {
        match error {
            AuthTokenError::InvalidToken | AuthTokenError::TokenExpired => ApiError::InvalidToken,
            AuthTokenError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Validation(e) => ApiError::Validation(e.to_string()),
            RegisterError::AlreadyExists => ApiError::AlreadyExists(error.to_string()),
            RegisterError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerifyAccountError> for ApiError {
    fn from(error: VerifyAccountError) -> Self {
        match error {
            VerifyAccountError::InvalidToken | VerifyAccountError::ExpiredToken => {
                ApiError::InvalidVerificationToken
            }
            VerifyAccountError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::InvalidCredentials => ApiError::InvalidCredentials,
            ChangePasswordError::WeakPassword => ApiError::Validation(error.to_string()),
            ChangePasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ChangeEmailError> for ApiError {
    fn from(error: ChangeEmailError) -> Self {
        match error {
            ChangeEmailError::Validation(e) => ApiError::Validation(e.to_string()),
            ChangeEmailError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerifyNewEmailError> for ApiError {
    fn from(error: VerifyNewEmailError) -> Self {
        match error {
            VerifyNewEmailError::InvalidToken | VerifyNewEmailError::ExpiredToken => {
                ApiError::InvalidVerificationToken
            }
            VerifyNewEmailError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::Forbidden => ApiError::Forbidden,
            DeleteAccountError::NotFound => ApiError::NotFound(error.to_string()),
            DeleteAccountError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::Validation(e) => ApiError::Validation(e.to_string()),
            ProfileError::NotFound => ApiError::NotFound(error.to_string()),
            ProfileError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ClinicsError> for ApiError {
    fn from(error: ClinicsError) -> Self {
        match error {
            ClinicsError::Validation(e) => ApiError::Validation(e.to_string()),
            ClinicsError::NotFound | ClinicsError::AddressNotFound => {
                ApiError::NotFound(error.to_string())
            }
            ClinicsError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<AddressesError> for ApiError {
    fn from(error: AddressesError) -> Self {
        match error {
            AddressesError::NotFound => ApiError::NotFound(error.to_string()),
            AddressesError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}
