use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A student with faculty and department names resolved.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub reg_no: Option<String>,
    pub year_of_study: Option<i32>,
    pub faculty_name: Option<String>,
    pub department_name: Option<String>,
}

/// One entry in a student's course list.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentCourse {
    pub course_id: Uuid,
    pub title: String,
    pub code: String,
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: StudentSummary,
    pub courses: Vec<StudentCourse>,
}
