use crate::modules::users::controller::link_student_account;
use crate::state::AppState;
use axum::{Router, routing::put};

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/{id}/student", put(link_student_account))
}
