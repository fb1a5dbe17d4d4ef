use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{SetupReport, SetupStatus};
use super::service::SetupService;

/// System status: entity counts and whether seeding is needed
#[utoipa::path(
    get,
    path = "/api/setup/status",
    responses(
        (status = 200, description = "Entity counts", body = SetupStatus)
    ),
    tag = "Setup"
)]
#[instrument(skip(state))]
pub async fn get_status(State(state): State<AppState>) -> Result<Json<SetupStatus>, AppError> {
    let status = SetupService::status(&state.db).await?;
    Ok(Json(status))
}

/// Seed sample faculties, departments, and a default admin account
#[utoipa::path(
    post,
    path = "/api/setup/initialize",
    responses(
        (status = 201, description = "System seeded", body = SetupReport),
        (status = 400, description = "System already initialized", body = ErrorResponse)
    ),
    tag = "Setup"
)]
#[instrument(skip(state))]
pub async fn initialize(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SetupReport>), AppError> {
    let report = SetupService::initialize(&state.db).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
