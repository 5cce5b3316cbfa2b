use crate::modules::students::controller::{
    create_student, delete_student, get_students, get_students_by_course, update_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/by-course/{code}", get(get_students_by_course))
        .route("/{id}", put(update_student).delete(delete_student))
}
