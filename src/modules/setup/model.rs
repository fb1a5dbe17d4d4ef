use serde::Serialize;
use utoipa::ToSchema;

/// Entity counts used to decide whether the system needs seeding.
#[derive(Debug, Serialize, ToSchema)]
pub struct SetupStatus {
    pub faculties: i64,
    pub departments: i64,
    pub users: i64,
    pub is_empty: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SetupReport {
    pub faculties: i64,
    pub departments: i64,
    pub admin_email: String,
}
