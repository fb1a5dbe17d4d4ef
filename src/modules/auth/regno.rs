//! Student registration number generation.
//!
//! A registration number has the shape `FAC/DEP/YY/NNN`: the faculty code,
//! the department code, the two-digit year, and a three-digit sequence
//! number scoped to that prefix. The sequence is derived by counting the
//! students already registered under the prefix; the UNIQUE constraint on
//! `users.reg_no` catches concurrent signups in the same scope, and the
//! caller retries generation on that conflict.

use chrono::Datelike;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::modules::departments::model::Department;
use crate::modules::faculties::model::Faculty;
use crate::utils::errors::AppError;

/// Highest sequence number the three-digit field can hold.
const SEQUENCE_MAX: i64 = 999;

/// Cap on how many alternative names a lookup failure enumerates.
const ALTERNATIVES_CAP: i64 = 15;

#[derive(Debug, Error)]
pub enum RegNoError {
    #[error("Faculty '{name}' not found. Available faculties: {available}")]
    FacultyNotFound { name: String, available: String },
    #[error(
        "Department '{name}' not found in faculty '{faculty}'. Available departments: {available}"
    )]
    DepartmentNotFound {
        name: String,
        faculty: String,
        available: String,
    },
    #[error("Registration number space for prefix '{prefix}' is exhausted")]
    SequenceExhausted { prefix: String },
    #[error("Database error while generating registration number: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RegNoError> for AppError {
    fn from(err: RegNoError) -> Self {
        match err {
            RegNoError::FacultyNotFound { .. } | RegNoError::DepartmentNotFound { .. } => {
                AppError::not_found(err)
            }
            RegNoError::SequenceExhausted { .. } => AppError::conflict(err),
            RegNoError::Database(_) => AppError::database(err),
        }
    }
}

/// Look up an active faculty by name.
///
/// A miss enumerates the available faculty names so an operator can spot
/// typos without a second request.
pub(crate) async fn resolve_faculty(db: &PgPool, name: &str) -> Result<Faculty, RegNoError> {
    let faculty = sqlx::query_as::<_, Faculty>(
        "SELECT id, name, code, description, contact_email, contact_phone, is_active,
                created_at, updated_at
         FROM faculties WHERE name = $1 AND is_active = TRUE",
    )
    .bind(name)
    .fetch_optional(db)
    .await?;

    match faculty {
        Some(faculty) => Ok(faculty),
        None => {
            let available = sqlx::query_scalar::<_, String>(
                "SELECT name FROM faculties WHERE is_active = TRUE ORDER BY name LIMIT $1",
            )
            .bind(ALTERNATIVES_CAP)
            .fetch_all(db)
            .await?;

            Err(RegNoError::FacultyNotFound {
                name: name.to_string(),
                available: available.join(", "),
            })
        }
    }
}

/// Look up an active department by name, scoped to its parent faculty.
///
/// A department name only means something inside its faculty, so the
/// lookup never falls back to an unscoped match.
pub(crate) async fn resolve_department(
    db: &PgPool,
    name: &str,
    faculty: &Faculty,
) -> Result<Department, RegNoError> {
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, description, faculty_id, is_active, created_at, updated_at
         FROM departments WHERE name = $1 AND faculty_id = $2 AND is_active = TRUE",
    )
    .bind(name)
    .bind(faculty.id)
    .fetch_optional(db)
    .await?;

    match department {
        Some(department) => Ok(department),
        None => {
            let available = sqlx::query_scalar::<_, String>(
                "SELECT name FROM departments
                 WHERE faculty_id = $1 AND is_active = TRUE ORDER BY name LIMIT $2",
            )
            .bind(faculty.id)
            .bind(ALTERNATIVES_CAP)
            .fetch_all(db)
            .await?;

            Err(RegNoError::DepartmentNotFound {
                name: name.to_string(),
                faculty: faculty.name.clone(),
                available: available.join(", "),
            })
        }
    }
}

/// Generate the next registration number for a faculty/department pair.
#[instrument(skip(db))]
pub async fn generate_reg_no(
    db: &PgPool,
    faculty_name: &str,
    department_name: &str,
) -> Result<String, RegNoError> {
    let faculty = resolve_faculty(db, faculty_name).await?;
    let department = resolve_department(db, department_name, &faculty).await?;

    let year = chrono::Utc::now().year();

    next_in_sequence(db, &faculty.code, &department.code, year).await
}

/// Count existing registrations under the prefix and take the next slot.
pub(crate) async fn next_in_sequence(
    db: &PgPool,
    faculty_code: &str,
    department_code: &str,
    year: i32,
) -> Result<String, RegNoError> {
    let prefix = reg_no_prefix(faculty_code, department_code, year);

    // literal prefix match: LIKE metacharacters in codes must not widen it
    let pattern = format!("{}%", escape_like(&prefix));
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users WHERE reg_no LIKE $1 ESCAPE '\\'",
    )
    .bind(&pattern)
    .fetch_one(db)
    .await?;

    let sequence = count + 1;
    if sequence > SEQUENCE_MAX {
        return Err(RegNoError::SequenceExhausted { prefix });
    }

    let reg_no = format!("{}{:03}", prefix, sequence);
    debug!(reg_no = %reg_no, "Generated registration number");

    Ok(reg_no)
}

fn reg_no_prefix(faculty_code: &str, department_code: &str, year: i32) -> String {
    format!(
        "{}/{}/{:02}/",
        faculty_code,
        department_code,
        year.rem_euclid(100)
    )
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn prefix_uses_two_digit_year() {
        assert_eq!(reg_no_prefix("SCI", "CSC", 2025), "SCI/CSC/25/");
        assert_eq!(reg_no_prefix("ART", "HIS", 2005), "ART/HIS/05/");
        assert_eq!(reg_no_prefix("ENG", "CVE", 2100), "ENG/CVE/00/");
    }

    #[test]
    fn escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("SCI/CSC/25/"), "SCI/CSC/25/");
        assert_eq!(escape_like("A%B"), "A\\%B");
        assert_eq!(escape_like("A_B"), "A\\_B");
        assert_eq!(escape_like("A\\B"), "A\\\\B");
    }

    #[test]
    fn faculty_not_found_maps_to_404() {
        let err = AppError::from(RegNoError::FacultyNotFound {
            name: "Faculty of Magic".to_string(),
            available: "Faculty of Science".to_string(),
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let message = err.error.to_string();
        assert!(message.contains("Faculty of Magic"));
        assert!(message.contains("Faculty of Science"));
    }

    #[test]
    fn department_mismatch_names_the_faculty() {
        let err = RegNoError::DepartmentNotFound {
            name: "History".to_string(),
            faculty: "Faculty of Science".to_string(),
            available: "Computer Science, Mathematics".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("History"));
        assert!(message.contains("Faculty of Science"));
        assert!(message.contains("Mathematics"));
    }

    #[test]
    fn sequence_exhaustion_maps_to_conflict() {
        let err = AppError::from(RegNoError::SequenceExhausted {
            prefix: "SCI/CSC/25/".to_string(),
        });
        assert_eq!(err.status, StatusCode::CONFLICT);
    }
}
