use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode, errors::ErrorKind};
use secrecy::{ExposeSecret, Secret};

use clinic_core::{AuthClaims, AuthTokenError, AuthTokenIssuer, User};

/// HS256 bearer tokens with typed claims.
///
/// Tokens carry `iat` and `exp`; the verifier rejects expired or
/// tampered tokens before any claim is visible to callers.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    secret: Secret<String>,
    ttl_seconds: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: Secret<String>, ttl_seconds: i64) -> Self {
        Self {
            secret,
            ttl_seconds,
        }
    }
}

impl AuthTokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<String, AuthTokenError> {
        let now = Utc::now();
        let delta = chrono::Duration::try_seconds(self.ttl_seconds).ok_or(
            AuthTokenError::UnexpectedError("Failed to create token duration".to_owned()),
        )?;
        let exp = now
            .checked_add_signed(delta)
            .ok_or(AuthTokenError::UnexpectedError(
                "Duration out of range".to_owned(),
            ))?
            .timestamp();

        let iat: usize = now
            .timestamp()
            .try_into()
            .map_err(|_| AuthTokenError::UnexpectedError("Failed to cast i64 to usize".to_owned()))?;
        let exp: usize = exp
            .try_into()
            .map_err(|_| AuthTokenError::UnexpectedError("Failed to cast i64 to usize".to_owned()))?;

        let claims = AuthClaims {
            sub: user.id,
            email: user.email.to_string(),
            role: user.role,
            iat,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthTokenError::UnexpectedError(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AuthClaims, AuthTokenError> {
        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthTokenError::TokenExpired,
            _ => AuthTokenError::InvalidToken,
        })
    }
}
