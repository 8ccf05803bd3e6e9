use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    address::{Address, NewAddress},
    clinic::{Clinic, ClinicAddress},
    email::Email,
    user::{NewUser, User, UserProfile},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new account as unverified and returns it with its
    /// assigned id.
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError>;
    /// Login lookup. Unverified accounts are indistinguishable from
    /// missing ones.
    async fn find_verified_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
    async fn update_profile(&self, id: Uuid, profile: UserProfile)
    -> Result<User, UserStoreError>;
    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError>;
    async fn set_email(&self, id: Uuid, email: &Email) -> Result<(), UserStoreError>;
    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError>;
}

// VerificationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token not found")]
    TokenNotFound,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TokenNotFound, Self::TokenNotFound) => true,
            (Self::TokenExpired, Self::TokenExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// One-time email verification tokens.
///
/// Redemption is consume-once: a token validates at most one time, and a
/// replayed or unknown token is `TokenNotFound` in both cases. Expiry is
/// enforced for both purposes.
#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    async fn save_account_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError>;

    /// Atomically consumes an initial-verification token and returns the
    /// bound account id.
    async fn redeem_account_token(&self, token: &str) -> Result<Uuid, TokenStoreError>;

    async fn save_email_change_token(
        &self,
        user_id: Uuid,
        new_email: &Email,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenStoreError>;

    /// Atomically consumes an email-change token and returns the bound
    /// account id together with the pending address.
    async fn redeem_email_change_token(
        &self,
        token: &str,
    ) -> Result<(Uuid, Email), TokenStoreError>;
}

// LoginAuditStore port trait and errors
#[derive(Debug, Error)]
pub enum AuditStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Append-only login attempt log. Best-effort: callers log failures and
/// carry on.
#[async_trait]
pub trait LoginAuditStore: Send + Sync {
    async fn record_attempt(
        &self,
        user_id: Option<Uuid>,
        ip: &str,
        success: bool,
    ) -> Result<(), AuditStoreError>;
}

// ClinicStore port trait and errors
#[derive(Debug, Error)]
pub enum ClinicStoreError {
    #[error("Clinic not found")]
    ClinicNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ClinicStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ClinicNotFound, Self::ClinicNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn create(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError>;
    async fn get(&self, id: Uuid) -> Result<Clinic, ClinicStoreError>;
    async fn list(&self) -> Result<Vec<Clinic>, ClinicStoreError>;
    async fn update(&self, clinic: Clinic) -> Result<Clinic, ClinicStoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), ClinicStoreError>;
    async fn add_address(&self, link: ClinicAddress) -> Result<(), ClinicStoreError>;
    async fn addresses(&self, clinic_id: Uuid) -> Result<Vec<ClinicAddress>, ClinicStoreError>;
}

// AddressStore port trait and errors
#[derive(Debug, Error)]
pub enum AddressStoreError {
    #[error("Address not found")]
    AddressNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AddressStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AddressNotFound, Self::AddressNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait AddressStore: Send + Sync {
    async fn create(&self, address: NewAddress) -> Result<Address, AddressStoreError>;
    async fn get(&self, id: Uuid) -> Result<Address, AddressStoreError>;
    async fn list(&self) -> Result<Vec<Address>, AddressStoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), AddressStoreError>;
}
