//! User domain models.
//!
//! A user is an identity plus a credential. Student-role users may carry a
//! back-reference to the student row they are allowed to read.

use enrollment_core::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::{StudentId, UserId};

/// A stored user account.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub linked_student_id: Option<StudentId>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("linked_student_id", &self.linked_student_id)
            .finish()
    }
}

/// Row to insert at registration. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// The authenticated identity a request runs as, taken from verified token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Body of `PUT /users/{id}/student`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LinkStudentDto {
    pub student_id: StudentId,
}
