use secrecy::Secret;
use uuid::Uuid;

use super::{email::Email, person_name::PersonName, role::Role};

/// A stored account, including the credential hash.
///
/// Never serialized directly; the HTTP layer maps it into a response DTO
/// that omits `password_hash`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
    pub email: Email,
    pub password_hash: Secret<String>,
    pub name: PersonName,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
    pub is_verified: bool,
}

/// Payload for creating an account. The store assigns the id and persists
/// the row unverified.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub role: Role,
    pub email: Email,
    pub password_hash: Secret<String>,
    pub name: PersonName,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
}

/// Profile fields that may change after registration.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub role: Role,
    pub email: Email,
    pub name: PersonName,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
}
