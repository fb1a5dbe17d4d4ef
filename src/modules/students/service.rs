use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{StudentCourse, StudentDetail, StudentSummary};

const STUDENT_SELECT: &str = "SELECT u.id, u.first_name, u.last_name, u.email, u.reg_no, \
                              u.year_of_study, f.name AS faculty_name, d.name AS department_name \
                              FROM users u \
                              LEFT JOIN faculties f ON f.id = u.faculty_id \
                              LEFT JOIN departments d ON d.id = u.department_id \
                              WHERE u.role = 'student' AND u.is_active = TRUE";

pub struct StudentService;

impl StudentService {
    pub async fn get_all_students(db: &PgPool) -> Result<Vec<StudentSummary>, AppError> {
        let query = format!("{STUDENT_SELECT} ORDER BY u.last_name, u.first_name");
        let students = sqlx::query_as::<_, StudentSummary>(&query)
            .fetch_all(db)
            .await?;
        Ok(students)
    }

    /// Look a student up by registration number, with their course list.
    #[instrument(skip(db))]
    pub async fn get_student_by_reg_no(
        db: &PgPool,
        reg_no: &str,
    ) -> Result<StudentDetail, AppError> {
        let query = format!("{STUDENT_SELECT} AND u.reg_no = $1");
        let student = sqlx::query_as::<_, StudentSummary>(&query)
            .bind(reg_no)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow!(
                    "Student with registration number '{}' not found",
                    reg_no
                ))
            })?;

        let courses = sqlx::query_as::<_, StudentCourse>(
            "SELECT c.id AS course_id, c.title, c.code, e.grade
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY c.code",
        )
        .bind(student.id)
        .fetch_all(db)
        .await?;

        Ok(StudentDetail { student, courses })
    }
}
