use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A department, owned by exactly one faculty.
///
/// Its `code` only means something together with the parent faculty's
/// code (`CSC` under `SCI` is not `CSC` under `ART`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub faculty_id: Uuid,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, max = 8, message = "code must be 1 to 8 characters"))]
    pub code: String,
    pub description: Option<String>,
    /// Name of the parent faculty.
    #[validate(length(min = 1, message = "faculty must not be empty"))]
    pub faculty: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 8, message = "code must be 1 to 8 characters"))]
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct DepartmentFilterParams {
    /// Restrict the listing to one faculty.
    pub faculty_id: Option<Uuid>,
}
