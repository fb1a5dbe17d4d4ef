use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_faculty, delete_faculty, get_all_faculties, get_faculty, update_faculty,
};

pub fn init_faculties_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_faculties))
        .route("/", post(create_faculty))
        .route("/me/{id}", get(get_faculty))
        .route("/{id}", put(update_faculty).delete(delete_faculty))
}
