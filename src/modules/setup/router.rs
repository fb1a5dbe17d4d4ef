use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_status, initialize};

pub fn init_setup_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/initialize", post(initialize))
}
