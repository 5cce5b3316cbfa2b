use axum::{Json, extract::State};
use enrollment_core::{AppError, errors::ErrorResponse};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::Course;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let caller = auth_user.caller()?;

    let courses = state.catalog.list_all(caller).await?;
    Ok(Json(courses))
}
