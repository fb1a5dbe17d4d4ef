use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateFacultyDto, Faculty, UpdateFacultyDto};
use super::service::FacultyService;

/// Create a faculty
#[utoipa::path(
    post,
    path = "/api/faculty",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = Faculty),
        (status = 409, description = "Faculty name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<Faculty>), AppError> {
    let faculty = FacultyService::create_faculty(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

/// List active faculties
#[utoipa::path(
    get,
    path = "/api/faculty/all",
    responses(
        (status = 200, description = "Active faculties sorted by name", body = [Faculty])
    ),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_all_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let faculties = FacultyService::get_all_faculties(&state.db).await?;
    Ok(Json(faculties))
}

/// Fetch a single faculty
#[utoipa::path(
    get,
    path = "/api/faculty/me/{id}",
    params(("id" = Uuid, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty details", body = Faculty),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_faculty(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = FacultyService::get_faculty_by_id(&state.db, id).await?;
    Ok(Json(faculty))
}

/// Update a faculty
#[utoipa::path(
    put,
    path = "/api/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty ID")),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Updated faculty", body = Faculty),
        (status = 404, description = "Faculty not found", body = ErrorResponse),
        (status = 409, description = "Faculty name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_faculty(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyDto>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = FacultyService::update_faculty(&state.db, id, dto).await?;
    Ok(Json(faculty))
}

/// Deactivate a faculty
#[utoipa::path(
    delete,
    path = "/api/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty deactivated", body = MessageResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    FacultyService::delete_faculty(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Faculty deleted successfully".to_string(),
    }))
}
