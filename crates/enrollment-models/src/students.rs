//! Student domain models and DTOs.
//!
//! This module contains the student row, the course-joined view returned by
//! every read, the create/update request bodies, and [`StudentChanges`], the
//! closed set of columns a partial update may touch.

use enrollment_core::serde::deserialize_present;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, StudentId};

/// A student row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub student_id: StudentId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course_id: Option<CourseId>,
}

/// A student joined with its course. Course fields are `None` when unenrolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct StudentView {
    pub student_id: StudentId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course_id: Option<CourseId>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

/// Row to insert. `course_id` has already been resolved from a course code.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course_id: Option<CourseId>,
}

/// Body of `POST /students`.
///
/// Missing strings deserialize as empty so the role gate runs before field
/// validation reports them.
#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
#[serde(default)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 200, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(max = 32, message = "phone is too long"))]
    pub phone: Option<String>,
    pub course_code: Option<String>,
}

/// Body of `PUT /students/{id}`.
///
/// Only keys present in the body are applied. `"phone": null` clears the phone;
/// omitting `phone` leaves it alone. A `null` for any other key is kept as
/// present-but-null so the update can reject it. Unrecognized keys are ignored.
#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    #[validate(length(min = 1, max = 200, message = "full_name must not be empty"))]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    #[validate(email(message = "email is invalid"))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub course_code: Option<Option<String>>,
}

impl UpdateStudentDto {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.course_code.is_none()
    }

    /// The first required column sent as an explicit `null`.
    pub fn null_required_field(&self) -> Option<&'static str> {
        if matches!(self.full_name, Some(None)) {
            Some("full_name")
        } else if matches!(self.email, Some(None)) {
            Some("email")
        } else {
            None
        }
    }
}

/// The columns a partial update writes. Every `Some` becomes one `SET` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub course_id: Option<CourseId>,
}

impl StudentChanges {
    /// Builds the changeset from a request body whose course code (if any)
    /// already resolved to `course_id`. `null` names and emails must have been
    /// rejected beforehand.
    pub fn from_dto(dto: UpdateStudentDto, course_id: Option<CourseId>) -> Self {
        Self {
            full_name: dto.full_name.flatten(),
            email: dto.email.flatten(),
            phone: dto.phone,
            course_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.course_id.is_none()
    }

    /// Applies the changeset to an in-memory row.
    pub fn merge_into(&self, student: &mut Student) {
        if let Some(full_name) = &self.full_name {
            student.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            student.phone = phone.clone();
        }
        if let Some(course_id) = self.course_id {
            student.course_id = Some(course_id);
        }
    }
}

/// What `GET /students` yields for a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentListing {
    /// Admin view: every student.
    All(Vec<StudentView>),
    /// The caller's own linked record.
    Own(StudentView),
    /// A student-role caller with no linked record.
    NoLinkedRecord,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedStudentResponse {
    pub student_id: StudentId,
}
