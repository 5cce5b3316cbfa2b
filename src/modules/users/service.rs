use std::sync::Arc;

use anyhow::anyhow;
use enrollment_core::{AccessControl, AppError, CredentialHasher, Operation, Role};
use tracing::{info, instrument, warn};

use crate::modules::students::repository::StudentRepositoryState;
use crate::modules::users::model::{Caller, NewUser};
use crate::modules::users::repository::UserRepositoryState;
use enrollment_models::ids::{StudentId, UserId};

pub type HasherState = Arc<dyn CredentialHasher>;

/// Registers users, verifies passwords, and links student accounts to
/// student records. Never issues tokens.
#[derive(Clone)]
pub struct CredentialStore {
    users: UserRepositoryState,
    students: StudentRepositoryState,
    hasher: HasherState,
}

impl CredentialStore {
    pub fn new(
        users: UserRepositoryState,
        students: StudentRepositoryState,
        hasher: HasherState,
    ) -> Self {
        Self {
            users,
            students,
            hasher,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<UserId, AppError> {
        if username.trim().is_empty() {
            return Err(AppError::validation(anyhow!("username is required")));
        }

        let password_hash = self.hasher.hash(password)?;

        let user_id = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user_id, role = %role, "User registered");
        Ok(user_id)
    }

    /// Returns the identity and role needed to issue a token.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserId, Role), AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Password verification failed");
            return Err(AppError::unauthorized("Incorrect password".to_string()));
        }

        Ok((user.id, user.role))
    }

    /// Points a student-role user at the student row they may read.
    #[instrument(skip(self))]
    pub async fn link_student(
        &self,
        caller: Caller,
        user_id: UserId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        AccessControl::authorize(caller.role, Operation::LinkStudentAccount)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if user.role != Role::Student {
            return Err(AppError::validation(anyhow!(
                "Only student accounts can be linked to a student record"
            )));
        }

        if self.students.find_view(student_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        self.users.set_linked_student(user_id, student_id).await?;

        info!(user_id = %user_id, student_id = %student_id, "Student account linked");
        Ok(())
    }
}
