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
    Course, CourseDetail, CourseFilterParams, CourseRoster, CreateCourseDto, EnrollRequestDto,
    PaginatedCoursesResponse, UpdateCourseDto,
};
use super::service::CourseService;

/// List active courses
#[utoipa::path(
    get,
    path = "/api/course/all",
    params(
        ("search" = Option<String>, Query, description = "Match against title or code"),
        ("department" = Option<Uuid>, Query, description = "Owning department"),
        ("semester" = Option<String>, Query, description = "first or second"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Courses with pagination metadata", body = PaginatedCoursesResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user, filters))]
pub async fn get_all_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let response = CourseService::get_all_courses(&state.db, filters).await?;
    Ok(Json(response))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Course already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn create_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Courses with at least one enrolled student
#[utoipa::path(
    get,
    path = "/api/course/enrollments",
    responses(
        (status = 200, description = "Course rosters", body = [CourseRoster]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_enrollments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<CourseRoster>>, AppError> {
    let rosters = CourseService::get_all_enrollments(&state.db).await?;
    Ok(Json(rosters))
}

/// Enroll a student into a course
#[utoipa::path(
    post,
    path = "/api/course/enroll",
    request_body = EnrollRequestDto,
    responses(
        (status = 201, description = "Student enrolled", body = MessageResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn enroll_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EnrollRequestDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    CourseService::enroll_student(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Student enrolled successfully".to_string(),
        }),
    ))
}

/// Fetch a single course with its roster
#[utoipa::path(
    get,
    path = "/api/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseDetail),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetail>, AppError> {
    let detail = CourseService::get_course(&state.db, id).await?;
    Ok(Json(detail))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course title already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

/// Deactivate a course
#[utoipa::path(
    delete,
    path = "/api/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deactivated", body = MessageResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}
