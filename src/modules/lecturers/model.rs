use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "lecturer_status", rename_all = "snake_case")]
pub enum LecturerStatus {
    JuniorLecturer,
    SeniorLecturer,
    Professor,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lecturer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub status: Option<LecturerStatus>,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLecturerDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    pub status: Option<LecturerStatus>,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLecturerDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    pub status: Option<LecturerStatus>,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LecturerFilterParams {
    pub department_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLecturersResponse {
    pub data: Vec<Lecturer>,
    pub meta: PaginationMeta,
}
