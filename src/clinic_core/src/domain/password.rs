use secrecy::{ExposeSecret, Secret};

use super::DomainError;

/// A plaintext password that satisfies the registration strength policy:
/// ASCII letters and digits only, at least 8 characters.
///
/// The policy intentionally rejects symbols; it is preserved from the
/// deployed service rather than tightened, so stored credentials keep
/// working across releases.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(value: Secret<String>) -> Result<Self, DomainError> {
        let raw = value.expose_secret();
        if raw.len() >= 8 && !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(value))
        } else {
            Err(DomainError::WeakPassword)
        }
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = DomainError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
