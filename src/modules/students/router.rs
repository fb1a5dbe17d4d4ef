use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_all_students, get_student};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_students))
        // wildcard: registration numbers contain slashes (SCI/CSC/25/001)
        .route("/{*reg_no}", get(get_student))
}
