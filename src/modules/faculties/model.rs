use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A faculty: the top level of the academic directory.
///
/// The `code` is the short token that namespaces registration numbers
/// (`SCI` in `SCI/CSC/25/001`). Faculties are never hard-deleted; the
/// `is_active` flag retires them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, max = 8, message = "code must be 1 to 8 characters"))]
    pub code: String,
    pub description: Option<String>,
    #[validate(email(message = "contact_email must be a valid email address"))]
    pub contact_email: String,
    #[validate(length(min = 1, message = "contact_phone must not be empty"))]
    pub contact_phone: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 8, message = "code must be 1 to 8 characters"))]
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(email(message = "contact_email must be a valid email address"))]
    pub contact_email: Option<String>,
    #[validate(length(min = 1, message = "contact_phone must not be empty"))]
    pub contact_phone: Option<String>,
}
