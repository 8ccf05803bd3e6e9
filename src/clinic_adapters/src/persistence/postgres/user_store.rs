use std::str::FromStr;

use async_trait::async_trait;
use secrecy::Secret;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use clinic_core::{
    Email, NewUser, PersonName, Role, User, UserProfile, UserStore, UserStoreError,
};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let role: String = row
        .try_get("role")
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        role: Role::from_str(&role).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        email: Email::parse(email).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        password_hash: Secret::from(
            row.try_get::<String, _>("password")
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        ),
        name: PersonName::parse(name)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        gender: row
            .try_get("gender")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        age: row
            .try_get("age")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        push_consent: row
            .try_get("push_consent")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        is_verified: row
            .try_get("is_verified")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
    })
}

fn map_insert_error(e: sqlx::Error) -> UserStoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint().is_some() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

const USER_COLUMNS: &str = "id, role, email, password, name, gender, age, push_consent, is_verified";

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        use secrecy::ExposeSecret;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO users (role, email, password, name, gender, age, push_consent)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.role.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.expose_secret())
        .bind(user.name.as_str())
        .bind(&user.gender)
        .bind(user.age)
        .bind(user.push_consent)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
            .ok_or(UserStoreError::UserNotFound)?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Login lookup in PostgreSQL", skip_all)]
    async fn find_verified_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_verified = TRUE"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
        .ok_or(UserStoreError::UserNotFound)?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        rows.iter().map(user_from_row).collect()
    }

    #[tracing::instrument(name = "Updating user profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: Uuid,
        profile: UserProfile,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET name = $1, email = $2, role = $3, gender = $4, age = $5, push_consent = $6
                WHERE id = $7
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(profile.name.as_str())
        .bind(profile.email.as_str())
        .bind(profile.role.as_str())
        .bind(&profile.gender)
        .bind(profile.age)
        .bind(profile.push_consent)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?
        .ok_or(UserStoreError::UserNotFound)?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError> {
        use secrecy::ExposeSecret;

        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(password_hash.expose_secret())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Set new email", skip_all)]
    async fn set_email(&self, id: Uuid, email: &Email) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET email = $1 WHERE id = $2")
            .bind(email.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Marking user as verified", skip_all)]
    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}
