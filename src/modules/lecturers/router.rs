use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

use super::controller::{
    create_lecturer, delete_lecturer, get_all_lecturers, get_lecturer, update_lecturer,
};

pub fn init_lecturers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_lecturers).post(create_lecturer))
        .route(
            "/{id}",
            get(get_lecturer).put(update_lecturer).delete(delete_lecturer),
        )
}
