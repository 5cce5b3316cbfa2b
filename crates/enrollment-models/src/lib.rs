//! # Enrollment Models
//!
//! Data structures used throughout the Enrollment API: database rows,
//! request/response DTOs, and validation rules.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed integer IDs
//! - [`auth`]: Registration and login payloads
//! - [`courses`]: Course rows
//! - [`students`]: Student rows, joined views, and update changesets
//! - [`users`]: User rows and the authenticated caller

pub mod auth;
pub mod courses;
pub mod ids;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};
pub use courses::{Course, CourseRoster};
pub use ids::{CourseId, StudentId, UserId};
pub use students::{
    CreateStudentDto, CreatedStudentResponse, NewStudent, Student, StudentChanges,
    StudentListing, StudentView, UpdateStudentDto,
};
pub use users::{Caller, LinkStudentDto, NewUser, User};
