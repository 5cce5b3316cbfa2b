//! Access-control decisions.
//!
//! Every gated operation in the API is named by an [`Operation`]. Which roles
//! may perform it is decided in exactly one place, [`AccessControl::decide`],
//! so adding a role or an operation is a single-point change.
//!
//! # Example
//!
//! ```ignore
//! use enrollment_core::{AccessControl, Decision, Operation, Role};
//!
//! assert_eq!(AccessControl::decide(Role::Admin, Operation::DeleteStudent), Decision::Allow);
//! assert_eq!(AccessControl::decide(Role::Student, Operation::DeleteStudent), Decision::Deny);
//! ```

use crate::errors::AppError;
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
    ListAllStudents,
    LinkStudentAccount,
    ListCourses,
    ReadOwnStudentRecord,
    ListStudentsByCourse,
}

impl Operation {
    /// Operations restricted to administrators.
    pub const fn requires_admin(self) -> bool {
        matches!(
            self,
            Operation::CreateStudent
                | Operation::UpdateStudent
                | Operation::DeleteStudent
                | Operation::ListAllStudents
                | Operation::LinkStudentAccount
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

pub struct AccessControl;

impl AccessControl {
    pub fn decide(role: Role, operation: Operation) -> Decision {
        match role {
            Role::Admin => Decision::Allow,
            Role::Student if operation.requires_admin() => Decision::Deny,
            Role::Student => Decision::Allow,
        }
    }

    /// Turns a [`Decision::Deny`] into a `Forbidden` error.
    ///
    /// The error says nothing about which role or operation was involved.
    pub fn authorize(role: Role, operation: Operation) -> Result<(), AppError> {
        match Self::decide(role, operation) {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(AppError::forbidden("Forbidden".to_string())),
        }
    }
}
