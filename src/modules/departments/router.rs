use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_department, delete_department, get_all_departments, get_department, update_department,
};

pub fn init_departments_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_departments))
        .route("/", post(create_department))
        .route("/me/{id}", get(get_department))
        .route("/{id}", put(update_department).delete(delete_department))
}
