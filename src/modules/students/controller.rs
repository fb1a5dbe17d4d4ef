use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{StudentDetail, StudentSummary};
use super::service::StudentService;

/// List all active students
#[utoipa::path(
    get,
    path = "/api/students/all",
    responses(
        (status = 200, description = "Students with faculty and department names", body = [StudentSummary])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentSummary>>, AppError> {
    let students = StudentService::get_all_students(&state.db).await?;
    Ok(Json(students))
}

/// Fetch a student by registration number
#[utoipa::path(
    get,
    path = "/api/students/{reg_no}",
    params(("reg_no" = String, Path, description = "Registration number, e.g. SCI/CSC/25/001")),
    responses(
        (status = 200, description = "Student with their course list", body = StudentDetail),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(reg_no): Path<String>,
) -> Result<Json<StudentDetail>, AppError> {
    let detail = StudentService::get_student_by_reg_no(&state.db, &reg_no).await?;
    Ok(Json(detail))
}
