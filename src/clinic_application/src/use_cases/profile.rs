use std::sync::Arc;

use uuid::Uuid;

use clinic_core::{
    DomainError, Email, PersonName, Role, User, UserProfile, UserStore, UserStoreError,
};

/// Raw profile-update payload before validation. Shares the registration
/// field set minus the password.
#[derive(Debug)]
pub struct UpdateProfileRequest {
    pub role: String,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub push_consent: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{0}")]
    Validation(#[from] DomainError),
    #[error("User not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<UserStoreError> for ProfileError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ProfileError::NotFound,
            e => ProfileError::UnexpectedError(e.to_string()),
        }
    }
}

/// Profile use case - account reads and profile updates.
pub struct ProfileUseCase {
    users: Arc<dyn UserStore>,
}

impl ProfileUseCase {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    #[tracing::instrument(name = "ProfileUseCase::get", skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<User, ProfileError> {
        Ok(self.users.get_user(id).await?)
    }

    #[tracing::instrument(name = "ProfileUseCase::list", skip_all)]
    pub async fn list(&self) -> Result<Vec<User>, ProfileError> {
        Ok(self.users.list_users().await?)
    }

    #[tracing::instrument(name = "ProfileUseCase::update", skip_all, fields(user_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, ProfileError> {
        let profile = UserProfile {
            role: request.role.parse::<Role>()?,
            email: Email::parse(request.email)?,
            name: PersonName::parse(request.name)?,
            gender: request.gender,
            age: request.age,
            push_consent: request.push_consent,
        };

        Ok(self.users.update_profile(id, profile).await?)
    }
}
