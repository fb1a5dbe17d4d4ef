use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, enroll_student, get_all_courses, get_all_enrollments, get_course,
    update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_courses))
        .route("/", post(create_course))
        .route("/enrollments", get(get_all_enrollments))
        .route("/enroll", post(enroll_student))
        .route("/{id}", get(get_course).put(update_course).delete(delete_course))
}
