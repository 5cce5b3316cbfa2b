use axum::{
    Json,
    extract::{Path, State},
};
use enrollment_core::{AppError, errors::ErrorResponse};
use tracing::instrument;

use crate::middleware::auth::RequireLinkStudentAccount;
use crate::modules::users::model::LinkStudentDto;
use crate::state::AppState;
use crate::validator::JsonBody;
use enrollment_models::MessageResponse;
use enrollment_models::ids::UserId;

#[utoipa::path(
    put,
    path = "/users/{id}/student",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = LinkStudentDto,
    responses(
        (status = 200, description = "Account linked", body = MessageResponse),
        (status = 400, description = "User is not a student account", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "User or student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn link_student_account(
    State(state): State<AppState>,
    RequireLinkStudentAccount(auth_user): RequireLinkStudentAccount,
    Path(id): Path<UserId>,
    JsonBody(dto): JsonBody<LinkStudentDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = auth_user.caller()?;

    state
        .credentials
        .link_student(caller, id, dto.student_id)
        .await?;

    Ok(Json(MessageResponse::new("Linked")))
}
