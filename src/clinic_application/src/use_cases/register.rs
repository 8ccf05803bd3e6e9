use std::sync::Arc;

use chrono::Duration;
use secrecy::Secret;
use uuid::Uuid;

use clinic_core::{
    CredentialHasher, DomainError, Email, EmailClient, NewUser, Password, PersonName, Role,
    TokenStoreError, User, UserStore, UserStoreError, VerificationTokenStore,
};

/// Raw registration payload before validation.
#[derive(Debug)]
pub struct RegisterRequest {
    pub role: String,
    pub email: String,
    pub password: Secret<String>,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(#[from] DomainError),
    #[error("User already exists")]
    AlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => RegisterError::AlreadyExists,
            e => RegisterError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<TokenStoreError> for RegisterError {
    fn from(error: TokenStoreError) -> Self {
        RegisterError::UnexpectedError(error.to_string())
    }
}

/// Register use case - creates an unverified account and mails the
/// activation link.
pub struct RegisterUseCase {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn VerificationTokenStore>,
    email_client: Arc<dyn EmailClient>,
    hasher: Arc<dyn CredentialHasher>,
    public_base_url: String,
    token_ttl: Duration,
}

impl RegisterUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn VerificationTokenStore>,
        email_client: Arc<dyn EmailClient>,
        hasher: Arc<dyn CredentialHasher>,
        public_base_url: String,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            tokens,
            email_client,
            hasher,
            public_base_url,
            token_ttl,
        }
    }

    /// Validates the payload, persists the account unverified and issues a
    /// single-use activation token. A failed email send is logged and
    /// tolerated: the account already exists and the link can be re-sent
    /// out of band.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, request: RegisterRequest) -> Result<User, RegisterError> {
        let email = Email::parse(request.email)?;
        let password = Password::parse(request.password)?;
        let name = PersonName::parse(request.name)?;
        let role: Role = request.role.parse()?;

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(|e| RegisterError::UnexpectedError(e.to_string()))?;

        let user = self
            .users
            .add_user(NewUser {
                role,
                email,
                password_hash,
                name,
                gender: request.gender,
                age: request.age,
                push_consent: request.push_consent,
            })
            .await?;

        let token = Uuid::new_v4().to_string();
        let expires_at = chrono::Utc::now() + self.token_ttl;
        self.tokens
            .save_account_token(user.id, &token, expires_at)
            .await?;

        let link = format!("{}/api/verify?token={}", self.public_base_url, token);
        let content = format!("click to activate account:\n{link}");
        if let Err(e) = self
            .email_client
            .send_email(&user.email, "Confirm your account", &content)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "verification email not sent");
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockEmailClient, MockHasher, MockTokenStore, MockUserStore,
    };
    use secrecy::ExposeSecret;

    fn use_case(
        users: MockUserStore,
        tokens: MockTokenStore,
        email_client: MockEmailClient,
    ) -> RegisterUseCase {
        RegisterUseCase::new(
            Arc::new(users),
            Arc::new(tokens),
            Arc::new(email_client),
            Arc::new(MockHasher),
            "http://localhost:8080".to_owned(),
            Duration::hours(24),
        )
    }

    fn request(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            role: "user".to_owned(),
            email: email.to_owned(),
            password: Secret::from(password.to_owned()),
            name: name.to_owned(),
            gender: "female".to_owned(),
            age: 30,
            push_consent: true,
        }
    }

    #[tokio::test]
    async fn creates_unverified_account_and_sends_link() {
        let users = MockUserStore::default();
        let tokens = MockTokenStore::default();
        let email_client = MockEmailClient::default();
        let use_case = use_case(users.clone(), tokens.clone(), email_client.clone());

        let user = use_case
            .execute(request("a@b.com", "abcdefgh", "Alice"))
            .await
            .unwrap();

        assert!(!user.is_verified);
        assert_ne!(user.password_hash.expose_secret(), "abcdefgh");

        let token = tokens.last_account_token().await.expect("token saved");
        let sent = email_client.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "a@b.com");
        assert!(sent[0].content.contains(&format!("/api/verify?token={token}")));
    }

    #[tokio::test]
    async fn rejects_invalid_fields() {
        let use_case = use_case(
            MockUserStore::default(),
            MockTokenStore::default(),
            MockEmailClient::default(),
        );

        let bad_email = use_case.execute(request("a.b.com", "abcdefgh", "Alice")).await;
        assert!(matches!(
            bad_email,
            Err(RegisterError::Validation(DomainError::InvalidEmail))
        ));

        let weak = use_case.execute(request("a@b.com", "short1", "Alice")).await;
        assert!(matches!(
            weak,
            Err(RegisterError::Validation(DomainError::WeakPassword))
        ));

        let bad_name = use_case.execute(request("a@b.com", "abcdefgh", "Alice2")).await;
        assert!(matches!(
            bad_name,
            Err(RegisterError::Validation(DomainError::InvalidName))
        ));
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let users = MockUserStore::default();
        let use_case = use_case(
            users.clone(),
            MockTokenStore::default(),
            MockEmailClient::default(),
        );

        use_case
            .execute(request("a@b.com", "abcdefgh", "Alice"))
            .await
            .unwrap();
        let duplicate = use_case.execute(request("a@b.com", "abcdefgh", "Bob")).await;
        assert!(matches!(duplicate, Err(RegisterError::AlreadyExists)));
    }

    #[tokio::test]
    async fn tolerates_email_delivery_failure() {
        let users = MockUserStore::default();
        let use_case = use_case(
            users.clone(),
            MockTokenStore::default(),
            MockEmailClient::failing(),
        );

        let user = use_case
            .execute(request("a@b.com", "abcdefgh", "Alice"))
            .await
            .unwrap();

        // The account stays created even though the email never went out.
        assert!(users.users.read().await.contains_key(&user.id));
    }
}
