use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "semester", rename_all = "lowercase")]
pub enum Semester {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub unit: i32,
    pub semester: Semester,
    pub level: Option<i32>,
    pub department_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    #[validate(range(min = 1, max = 6, message = "unit must be between 1 and 6"))]
    pub unit: i32,
    pub semester: Semester,
    pub level: Option<i32>,
    /// Name of the owning department.
    #[validate(length(min = 1, message = "department_name must not be empty"))]
    pub department_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(range(min = 1, max = 6, message = "unit must be between 1 and 6"))]
    pub unit: Option<i32>,
    pub semester: Option<Semester>,
    pub level: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CourseFilterParams {
    /// Case-insensitive match against title or code.
    pub search: Option<String>,
    pub department: Option<Uuid>,
    pub semester: Option<Semester>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PaginationMeta,
}

/// Enroll a student (by registration number) into a course (by code).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollRequestDto {
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub reg_no: String,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EnrolledStudent {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub reg_no: Option<String>,
    pub grade: Option<String>,
}

/// A course together with everyone enrolled in it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRoster {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub department_name: Option<String>,
    pub enrolled_students: Vec<EnrolledStudent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub department_name: Option<String>,
    pub enrolled_students: Vec<EnrolledStudent>,
}
