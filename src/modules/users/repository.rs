use std::sync::Arc;

use async_trait::async_trait;
use enrollment_core::AppError;
use enrollment_db::{PgPool, unique_violation_or_store};

use crate::modules::users::model::{NewUser, User};
use enrollment_models::ids::{StudentId, UserId};

/// Access to the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. A taken username is a `Conflict`.
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;
    async fn set_linked_student(&self, id: UserId, student_id: StudentId)
    -> Result<(), AppError>;
}

pub type UserRepositoryState = Arc<dyn UserRepository>;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError> {
        sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation_or_store(e, "Username already exists"))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, linked_student_id
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::database)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, linked_student_id
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::database)
    }

    async fn set_linked_student(
        &self,
        id: UserId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET linked_student_id = $1 WHERE id = $2")
            .bind(student_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}
