use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::departments::router::init_departments_router;
use crate::modules::faculties::router::init_faculties_router;
use crate::modules::lecturers::router::init_lecturers_router;
use crate::modules::setup::router::init_setup_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .route("/health", get(health))
                .nest("/setup", init_setup_router())
                .nest("/auth", init_auth_router())
                .nest("/faculty", init_faculties_router())
                .nest("/department", init_departments_router())
                .nest("/course", init_courses_router())
                .nest("/students", init_students_router())
                .nest("/lecturer", init_lecturers_router()),
        )
        .with_state(state.clone())
        .layer({
            let allow_origin = if state.cors_config.allowed_origins.is_empty() {
                AllowOrigin::mirror_request()
            } else {
                let origins: Vec<HeaderValue> = state
                    .cors_config
                    .allowed_origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect();
                AllowOrigin::list(origins)
            };

            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
