//! Account models and DTOs.
//!
//! [`User`] is the public projection of an account row: it never carries
//! the password hash. [`AccountProfile`] is the role-dependent part of a
//! new account — students carry a registration number and year of study,
//! staff carry neither, and the enum makes any other combination
//! unrepresentable.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Bearer-token claims: who the token belongs to and when it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub first_name: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
    Lecturer,
}

/// Public-safe account projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub reg_no: Option<String>,
    pub year_of_study: Option<i32>,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Role-dependent part of a new account.
#[derive(Debug, Clone)]
pub enum AccountProfile {
    Student { reg_no: String, year_of_study: i32 },
    Staff,
}

impl AccountProfile {
    pub fn reg_no(&self) -> Option<&str> {
        match self {
            AccountProfile::Student { reg_no, .. } => Some(reg_no),
            AccountProfile::Staff => None,
        }
    }

    pub fn year_of_study(&self) -> Option<i32> {
        match self {
            AccountProfile::Student { year_of_study, .. } => Some(*year_of_study),
            AccountProfile::Staff => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "faculty_name must not be empty"))]
    pub faculty_name: String,
    #[validate(length(min = 1, message = "department_name must not be empty"))]
    pub department_name: String,
    /// Defaults to `student` when omitted.
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Issued on successful registration or login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_profile_has_no_student_fields() {
        let profile = AccountProfile::Staff;
        assert_eq!(profile.reg_no(), None);
        assert_eq!(profile.year_of_study(), None);
    }

    #[test]
    fn student_profile_exposes_both_fields() {
        let profile = AccountProfile::Student {
            reg_no: "SCI/CSC/25/001".to_string(),
            year_of_study: 2025,
        };
        assert_eq!(profile.reg_no(), Some("SCI/CSC/25/001"));
        assert_eq!(profile.year_of_study(), Some(2025));
    }

    #[test]
    fn user_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Student).unwrap(),
            r#""student""#
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Lecturer).unwrap(),
            r#""lecturer""#
        );
    }
}
