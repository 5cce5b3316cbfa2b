use std::sync::Arc;

use async_trait::async_trait;
use enrollment_core::AppError;
use enrollment_db::{PgPool, unique_violation_or_store};
use sqlx::{Postgres, QueryBuilder};

use crate::modules::students::model::{NewStudent, StudentChanges, StudentView};
use enrollment_models::ids::{CourseId, StudentId};

const VIEW_SELECT: &str = "SELECT s.student_id, s.full_name, s.email, s.phone, s.course_id,
        c.course_name, c.course_code
     FROM students s
     LEFT JOIN courses c ON c.course_id = s.course_id";

/// Access to the `students` table. Reads always come back joined with the course.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a student. A taken email is a `Conflict`.
    async fn insert(&self, student: NewStudent) -> Result<StudentId, AppError>;
    async fn list_views(&self) -> Result<Vec<StudentView>, AppError>;
    async fn find_view(&self, id: StudentId) -> Result<Option<StudentView>, AppError>;
    async fn list_views_by_course(&self, course_id: CourseId)
    -> Result<Vec<StudentView>, AppError>;
    /// Writes the present columns in one statement. A missing id matches no row
    /// and succeeds.
    async fn apply_changes(&self, id: StudentId, changes: &StudentChanges)
    -> Result<(), AppError>;
    /// Deleting a missing id succeeds.
    async fn delete(&self, id: StudentId) -> Result<(), AppError>;
}

pub type StudentRepositoryState = Arc<dyn StudentRepository>;

/// Builds `UPDATE students SET ... WHERE student_id = $n` for the present
/// columns. Column names are fixed; every value is a bound parameter.
pub fn build_update(id: StudentId, changes: &StudentChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE students SET ");

    {
        let mut columns = builder.separated(", ");
        if let Some(full_name) = &changes.full_name {
            columns
                .push("full_name = ")
                .push_bind_unseparated(full_name.clone());
        }
        if let Some(email) = &changes.email {
            columns.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(phone) = &changes.phone {
            columns.push("phone = ").push_bind_unseparated(phone.clone());
        }
        if let Some(course_id) = changes.course_id {
            columns.push("course_id = ").push_bind_unseparated(course_id);
        }
    }

    builder.push(" WHERE student_id = ").push_bind(id);
    builder
}

pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn insert(&self, student: NewStudent) -> Result<StudentId, AppError> {
        sqlx::query_scalar::<_, StudentId>(
            "INSERT INTO students (full_name, email, phone, course_id)
             VALUES ($1, $2, $3, $4)
             RETURNING student_id",
        )
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation_or_store(e, "Email already exists"))
    }

    async fn list_views(&self) -> Result<Vec<StudentView>, AppError> {
        sqlx::query_as::<_, StudentView>(&format!("{VIEW_SELECT} ORDER BY s.student_id"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::database)
    }

    async fn find_view(&self, id: StudentId) -> Result<Option<StudentView>, AppError> {
        sqlx::query_as::<_, StudentView>(&format!("{VIEW_SELECT} WHERE s.student_id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    async fn list_views_by_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<StudentView>, AppError> {
        sqlx::query_as::<_, StudentView>(&format!(
            "{VIEW_SELECT} WHERE s.course_id = $1 ORDER BY s.student_id"
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)
    }

    async fn apply_changes(
        &self,
        id: StudentId,
        changes: &StudentChanges,
    ) -> Result<(), AppError> {
        if changes.is_empty() {
            return Ok(());
        }

        build_update(id, changes)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation_or_store(e, "Email already exists"))?;

        Ok(())
    }

    async fn delete(&self, id: StudentId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_single_column() {
        let changes = StudentChanges {
            phone: Some(Some("555-0199".to_string())),
            ..Default::default()
        };
        let builder = build_update(StudentId(3), &changes);
        assert_eq!(
            builder.sql(),
            "UPDATE students SET phone = $1 WHERE student_id = $2"
        );
    }

    #[test]
    fn test_build_update_all_columns_in_fixed_order() {
        let changes = StudentChanges {
            full_name: Some("Grace Hopper".to_string()),
            email: Some("grace@example.com".to_string()),
            phone: Some(None),
            course_id: Some(CourseId(2)),
        };
        let builder = build_update(StudentId(1), &changes);
        assert_eq!(
            builder.sql(),
            "UPDATE students SET full_name = $1, email = $2, phone = $3, course_id = $4 \
             WHERE student_id = $5"
        );
    }

    #[test]
    fn test_build_update_never_inlines_values() {
        let changes = StudentChanges {
            full_name: Some("Robert'); DROP TABLE students;--".to_string()),
            ..Default::default()
        };
        let builder = build_update(StudentId(1), &changes);
        assert!(!builder.sql().contains("DROP"));
    }
}
