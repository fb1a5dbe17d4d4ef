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

use super::model::{CreateDepartmentDto, Department, DepartmentFilterParams, UpdateDepartmentDto};
use super::service::DepartmentService;

/// Create a department under a named faculty
#[utoipa::path(
    post,
    path = "/api/department",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 404, description = "Parent faculty not found", body = ErrorResponse),
        (status = 409, description = "Department name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = DepartmentService::create_department(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// List active departments
#[utoipa::path(
    get,
    path = "/api/department/all",
    params(DepartmentFilterParams),
    responses(
        (status = 200, description = "Active departments sorted by name", body = [Department])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_all_departments(
    State(state): State<AppState>,
    Query(filters): Query<DepartmentFilterParams>,
) -> Result<Json<Vec<Department>>, AppError> {
    let departments = DepartmentService::get_all_departments(&state.db, filters).await?;
    Ok(Json(departments))
}

/// Fetch a single department
#[utoipa::path(
    get,
    path = "/api/department/me/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::get_department_by_id(&state.db, id).await?;
    Ok(Json(department))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/api/department/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Updated department", body = Department),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Department name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::update_department(&state.db, id, dto).await?;
    Ok(Json(department))
}

/// Deactivate a department
#[utoipa::path(
    delete,
    path = "/api/department/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deactivated", body = MessageResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    DepartmentService::delete_department(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Department deleted successfully".to_string(),
    }))
}
