use anyhow::anyhow;
use enrollment_core::{AccessControl, AppError, Decision, ErrorKind, Operation};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::modules::courses::model::CourseRoster;
use crate::modules::courses::service::CourseCatalog;
use crate::modules::students::model::{
    CreateStudentDto, NewStudent, StudentChanges, StudentListing, UpdateStudentDto,
};
use crate::modules::students::repository::StudentRepositoryState;
use crate::modules::users::model::Caller;
use crate::modules::users::repository::UserRepositoryState;
use crate::validator::format_errors;
use enrollment_models::ids::{CourseId, StudentId};

/// Role-gated create, read, update, and delete over student records.
///
/// Every operation authorizes the caller before looking at its input, so a
/// non-admin gets `Forbidden` whether or not the body would have validated.
#[derive(Clone)]
pub struct StudentRegistry {
    students: StudentRepositoryState,
    users: UserRepositoryState,
    catalog: CourseCatalog,
}

impl StudentRegistry {
    pub fn new(
        students: StudentRepositoryState,
        users: UserRepositoryState,
        catalog: CourseCatalog,
    ) -> Self {
        Self {
            students,
            users,
            catalog,
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn create(
        &self,
        caller: Caller,
        dto: CreateStudentDto,
    ) -> Result<StudentId, AppError> {
        AccessControl::authorize(caller.role, Operation::CreateStudent)?;

        dto.validate()
            .map_err(|e| AppError::validation(anyhow!("{}", format_errors(&e))))?;

        let course_id = self
            .resolve_course(dto.course_code.as_deref().map(Some))
            .await?;

        let student_id = self
            .students
            .insert(NewStudent {
                full_name: dto.full_name,
                email: dto.email,
                phone: dto.phone,
                course_id,
            })
            .await?;

        info!(student_id = %student_id, "Student created");
        Ok(student_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, caller: Caller) -> Result<StudentListing, AppError> {
        if AccessControl::decide(caller.role, Operation::ListAllStudents) == Decision::Allow {
            return Ok(StudentListing::All(self.students.list_views().await?));
        }

        AccessControl::authorize(caller.role, Operation::ReadOwnStudentRecord)?;

        let linked = self
            .users
            .find_by_id(caller.user_id)
            .await?
            .and_then(|user| user.linked_student_id);

        let Some(student_id) = linked else {
            debug!(user_id = %caller.user_id, "Caller has no linked student record");
            return Ok(StudentListing::NoLinkedRecord);
        };

        let view = self
            .students
            .find_view(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        Ok(StudentListing::Own(view))
    }

    /// Any authenticated caller may list a course roster.
    #[instrument(skip(self))]
    pub async fn list_by_course(
        &self,
        caller: Caller,
        course_code: &str,
    ) -> Result<CourseRoster, AppError> {
        AccessControl::authorize(caller.role, Operation::ListStudentsByCourse)?;

        let course = self.catalog.find_by_code(course_code).await?;
        let students = self.students.list_views_by_course(course.course_id).await?;

        Ok(CourseRoster {
            course: course.course_name,
            students,
        })
    }

    /// Merges the present fields into the row. Nothing is written unless every
    /// field, including the course code, checks out. An id that matches no row
    /// is a silent no-op.
    #[instrument(skip(self, dto))]
    pub async fn update(
        &self,
        caller: Caller,
        student_id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<(), AppError> {
        AccessControl::authorize(caller.role, Operation::UpdateStudent)?;

        if dto.is_empty() {
            return Err(AppError::validation(anyhow!("No fields to update")));
        }

        if let Some(field) = dto.null_required_field() {
            return Err(AppError::validation(anyhow!("{} cannot be null", field)));
        }

        dto.validate()
            .map_err(|e| AppError::validation(anyhow!("{}", format_errors(&e))))?;

        let course_id = self
            .resolve_course(dto.course_code.as_ref().map(|code| code.as_deref()))
            .await?;
        let changes = StudentChanges::from_dto(dto, course_id);

        self.students.apply_changes(student_id, &changes).await?;

        info!(student_id = %student_id, "Student updated");
        Ok(())
    }

    /// Deleting an id that matches no row succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, caller: Caller, student_id: StudentId) -> Result<(), AppError> {
        AccessControl::authorize(caller.role, Operation::DeleteStudent)?;

        self.students.delete(student_id).await?;

        info!(student_id = %student_id, "Student deleted");
        Ok(())
    }

    /// An unknown course code supplied in a write body is bad input, not a
    /// missing resource. A code sent as `null` never resolves.
    async fn resolve_course(
        &self,
        code: Option<Option<&str>>,
    ) -> Result<Option<CourseId>, AppError> {
        let code = match code {
            None => return Ok(None),
            Some(None) => return Err(AppError::validation(anyhow!("Course not found"))),
            Some(Some(code)) => code,
        };

        match self.catalog.find_by_code(code).await {
            Ok(course) => Ok(Some(course.course_id)),
            Err(e) if e.kind == ErrorKind::NotFound => {
                Err(AppError::validation(anyhow!("Course not found")))
            }
            Err(e) => Err(e),
        }
    }
}
