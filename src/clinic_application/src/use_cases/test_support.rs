//! Shared in-memory fakes for use-case unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{
    AuditStoreError, CredentialHasher, Email, EmailClient, HasherError, LoginAuditStore, NewUser,
    Password, PersonName, Role, TokenStoreError, User, UserProfile, UserStore, UserStoreError,
    VerificationTokenStore,
};

#[derive(Default, Clone)]
pub struct MockUserStore {
    pub users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserStore {
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            role: user.role,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            gender: user.gender,
            age: user.age,
            push_consent: user.push_consent,
            is_verified: false,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_verified_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.is_verified && &u.email == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        profile: UserProfile,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.role = profile.role;
        user.email = profile.email;
        user.name = profile.name;
        user.gender = profile.gender;
        user.age = profile.age;
        user.push_consent = profile.push_consent;
        Ok(user.clone())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn set_email(&self, id: Uuid, email: &Email) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.email = email.clone();
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.is_verified = true;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}

struct AccountTokenRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

struct EmailChangeTokenRow {
    user_id: Uuid,
    new_email: Email,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

#[derive(Default, Clone)]
pub struct MockTokenStore {
    account: Arc<RwLock<HashMap<String, AccountTokenRow>>>,
    email_change: Arc<RwLock<HashMap<String, EmailChangeTokenRow>>>,
}

impl MockTokenStore {
    pub async fn last_account_token(&self) -> Option<String> {
        self.account.read().await.keys().next().cloned()
    }
}

#[async_trait]
impl VerificationTokenStore for MockTokenStore {
    async fn save_account_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        self.account.write().await.insert(
            token.to_owned(),
            AccountTokenRow {
                user_id,
                expires_at,
                consumed: false,
            },
        );
        Ok(())
    }

    async fn redeem_account_token(&self, token: &str) -> Result<Uuid, TokenStoreError> {
        let mut tokens = self.account.write().await;
        let row = tokens.get_mut(token).ok_or(TokenStoreError::TokenNotFound)?;
        if row.consumed {
            return Err(TokenStoreError::TokenNotFound);
        }
        if row.expires_at <= Utc::now() {
            return Err(TokenStoreError::TokenExpired);
        }
        row.consumed = true;
        Ok(row.user_id)
    }

    async fn save_email_change_token(
        &self,
        user_id: Uuid,
        new_email: &Email,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError> {
        self.email_change.write().await.insert(
            token.to_owned(),
            EmailChangeTokenRow {
                user_id,
                new_email: new_email.clone(),
                expires_at,
                consumed: false,
            },
        );
        Ok(())
    }

    async fn redeem_email_change_token(
        &self,
        token: &str,
    ) -> Result<(Uuid, Email), TokenStoreError> {
        let mut tokens = self.email_change.write().await;
        let row = tokens.get_mut(token).ok_or(TokenStoreError::TokenNotFound)?;
        if row.consumed {
            return Err(TokenStoreError::TokenNotFound);
        }
        if row.expires_at <= Utc::now() {
            return Err(TokenStoreError::TokenExpired);
        }
        row.consumed = true;
        Ok((row.user_id, row.new_email.clone()))
    }
}

#[derive(Default, Clone)]
pub struct MockAuditStore {
    pub attempts: Arc<RwLock<Vec<(Option<Uuid>, String, bool)>>>,
}

#[async_trait]
impl LoginAuditStore for MockAuditStore {
    async fn record_attempt(
        &self,
        user_id: Option<Uuid>,
        ip: &str,
        success: bool,
    ) -> Result<(), AuditStoreError> {
        self.attempts
            .write()
            .await
            .push((user_id, ip.to_owned(), success));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: Email,
    pub subject: String,
    pub content: String,
}

#[derive(Default, Clone)]
pub struct MockEmailClient {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    pub fail: bool,
}

impl MockEmailClient {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("smtp unreachable".to_owned());
        }
        self.sent.write().await.push(SentEmail {
            to: recipient.clone(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}

/// Deterministic stand-in for the Argon2 hasher so tests stay fast.
#[derive(Default, Clone)]
pub struct MockHasher;

#[async_trait]
impl CredentialHasher for MockHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        Ok(Secret::from(format!(
            "hashed::{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(
        &self,
        candidate: &Secret<String>,
        password_hash: &Secret<String>,
    ) -> Result<bool, HasherError> {
        Ok(password_hash.expose_secret() == &format!("hashed::{}", candidate.expose_secret()))
    }
}

pub fn sample_user(email: &str, password: &str, role: Role, verified: bool) -> User {
    User {
        id: Uuid::new_v4(),
        role,
        email: Email::parse(email.to_owned()).unwrap(),
        password_hash: Secret::from(format!("hashed::{password}")),
        name: PersonName::parse("Alice".to_owned()).unwrap(),
        gender: "female".to_owned(),
        age: 30,
        push_consent: true,
        is_verified: verified,
    }
}
