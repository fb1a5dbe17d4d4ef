use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateLecturerDto, Lecturer, LecturerFilterParams, PaginatedLecturersResponse,
    UpdateLecturerDto,
};
use super::service::LecturerService;

/// List active lecturers
#[utoipa::path(
    get,
    path = "/api/lecturer",
    params(
        ("department_id" = Option<Uuid>, Query, description = "Filter by department"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Lecturers with pagination metadata", body = PaginatedLecturersResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lecturers"
)]
#[instrument(skip(state, _auth_user, filters))]
pub async fn get_all_lecturers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<LecturerFilterParams>,
) -> Result<Json<PaginatedLecturersResponse>, AppError> {
    let response = LecturerService::get_all_lecturers(&state.db, filters).await?;
    Ok(Json(response))
}

/// Create a lecturer
#[utoipa::path(
    post,
    path = "/api/lecturer",
    request_body = CreateLecturerDto,
    responses(
        (status = 201, description = "Lecturer created", body = Lecturer),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lecturers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn create_lecturer(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLecturerDto>,
) -> Result<(StatusCode, Json<Lecturer>), AppError> {
    let lecturer = LecturerService::create_lecturer(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lecturer)))
}

/// Fetch a single lecturer
#[utoipa::path(
    get,
    path = "/api/lecturer/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer details", body = Lecturer),
        (status = 404, description = "Lecturer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lecturers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_lecturer(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Lecturer>, AppError> {
    let lecturer = LecturerService::get_lecturer_by_id(&state.db, id).await?;
    Ok(Json(lecturer))
}

/// Update a lecturer
#[utoipa::path(
    put,
    path = "/api/lecturer/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    request_body = UpdateLecturerDto,
    responses(
        (status = 200, description = "Updated lecturer", body = Lecturer),
        (status = 404, description = "Lecturer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lecturers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_lecturer(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLecturerDto>,
) -> Result<Json<Lecturer>, AppError> {
    let lecturer = LecturerService::update_lecturer(&state.db, id, dto).await?;
    Ok(Json(lecturer))
}

/// Deactivate a lecturer
#[utoipa::path(
    delete,
    path = "/api/lecturer/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer deactivated", body = MessageResponse),
        (status = 404, description = "Lecturer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lecturers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_lecturer(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    LecturerService::delete_lecturer(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Lecturer deleted successfully".to_string(),
    }))
}
