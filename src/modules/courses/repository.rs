use std::sync::Arc;

use async_trait::async_trait;
use enrollment_core::AppError;
use enrollment_db::PgPool;

use crate::modules::courses::model::Course;

/// Read access to the `courses` table.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Course>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, AppError>;
}

pub type CourseRepositoryState = Arc<dyn CourseRepository>;

pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn list_all(&self) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT course_id, course_code, course_name FROM courses ORDER BY course_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT course_id, course_code, course_name FROM courses WHERE course_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::database)
    }
}
