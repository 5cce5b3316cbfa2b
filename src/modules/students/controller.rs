use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enrollment_core::{AppError, errors::ErrorResponse};
use serde_json::json;
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireCreateStudent, RequireUpdateStudent};
use crate::modules::courses::model::CourseRoster;
use crate::modules::students::model::{
    CreateStudentDto, CreatedStudentResponse, StudentListing, StudentView, UpdateStudentDto,
};
use crate::state::AppState;
use crate::validator::JsonBody;
use enrollment_models::MessageResponse;
use enrollment_models::ids::StudentId;

#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = CreatedStudentResponse),
        (status = 400, description = "Invalid input, unknown course, or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireCreateStudent(auth_user): RequireCreateStudent,
    JsonBody(dto): JsonBody<CreateStudentDto>,
) -> Result<(StatusCode, Json<CreatedStudentResponse>), AppError> {
    let caller = auth_user.caller()?;

    let student_id = state.registry.create(caller, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedStudentResponse { student_id }),
    ))
}

/// Admins get every student. Student accounts get their own linked record.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students (admin) or the caller's own record (student)", body = [StudentView]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No linked student record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let caller = auth_user.caller()?;

    let response = match state.registry.list(caller).await? {
        StudentListing::All(students) => Json(students).into_response(),
        StudentListing::Own(student) => Json(student).into_response(),
        StudentListing::NoLinkedRecord => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No linked student" })),
        )
            .into_response(),
    };

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/students/by-course/{code}",
    params(
        ("code" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Course name and enrolled students", body = CourseRoster),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<CourseRoster>, AppError> {
    let caller = auth_user.caller()?;

    let roster = state.registry.list_by_course(caller, &code).await?;
    Ok(Json(roster))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = MessageResponse),
        (status = 400, description = "No fields, invalid input, unknown course, or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    RequireUpdateStudent(auth_user): RequireUpdateStudent,
    Path(id): Path<StudentId>,
    JsonBody(dto): JsonBody<UpdateStudentDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = auth_user.caller()?;

    state.registry.update(caller, id, dto).await?;
    Ok(Json(MessageResponse::new("Updated")))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = auth_user.caller()?;

    state.registry.delete(caller, id).await?;
    Ok(Json(MessageResponse::new("Deleted")))
}
