use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use clinic_core::{CredentialHasher, HasherError, Password};

/// Argon2id credential hasher. Hashing is CPU-bound, so both operations
/// run on the blocking pool with the current span re-entered inside the
/// closure.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

fn argon2<'a>() -> Result<Argon2<'a>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        let password = password.as_ref().clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| HasherError::UnexpectedError(e.to_string()))?
        .map_err(HasherError::UnexpectedError)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Secret<String>,
        password_hash: &Secret<String>,
    ) -> Result<bool, HasherError> {
        let candidate = candidate.clone();
        let password_hash = password_hash.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

                match argon2()
                    .map_err(|e| e.to_string())?
                    .verify_password(candidate.expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(e.to_string()),
                }
            })
        })
        .await
        .map_err(|e| HasherError::UnexpectedError(e.to_string()))?
        .map_err(HasherError::UnexpectedError)
    }
}
