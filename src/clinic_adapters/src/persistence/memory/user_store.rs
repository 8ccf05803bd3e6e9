use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_core::{Email, NewUser, User, UserProfile, UserStore, UserStoreError};

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
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
            .find(|u| u.is_verified && u.email.as_str() == email.as_str())
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
