//! Course models.
//!
//! Courses are provisioned outside the API and only read here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::CourseId;
use crate::students::StudentView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_name: String,
}

/// Response of `GET /students/by-course/{code}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRoster {
    /// Course name.
    pub course: String,
    pub students: Vec<StudentView>,
}
