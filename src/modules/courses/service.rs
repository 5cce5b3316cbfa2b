use anyhow::anyhow;
use enrollment_core::{AccessControl, AppError, Operation};
use tracing::instrument;

use crate::modules::courses::model::Course;
use crate::modules::courses::repository::CourseRepositoryState;
use crate::modules::users::model::Caller;

/// Read-only lookup of courses.
#[derive(Clone)]
pub struct CourseCatalog {
    courses: CourseRepositoryState,
}

impl CourseCatalog {
    pub fn new(courses: CourseRepositoryState) -> Self {
        Self { courses }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self, caller: Caller) -> Result<Vec<Course>, AppError> {
        AccessControl::authorize(caller.role, Operation::ListCourses)?;

        self.courses.list_all().await
    }

    /// Resolves an external course code.
    ///
    /// Callers that treat an unknown code as bad input rather than a missing
    /// resource remap the `NotFound` themselves.
    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Course, AppError> {
        self.courses
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }
}
