use crate::modules::courses::controller::list_courses;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_courses_router() -> Router<AppState> {
    Router::new().route("/", get(list_courses))
}
