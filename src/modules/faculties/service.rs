use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateFacultyDto, Faculty, UpdateFacultyDto};

const FACULTY_COLUMNS: &str = "id, name, code, description, contact_email, contact_phone, \
                               is_active, created_at, updated_at";

pub struct FacultyService;

impl FacultyService {
    #[instrument(skip(db, dto), fields(faculty.name = %dto.name))]
    pub async fn create_faculty(db: &PgPool, dto: CreateFacultyDto) -> Result<Faculty, AppError> {
        let query = format!(
            "INSERT INTO faculties (name, code, description, contact_email, contact_phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FACULTY_COLUMNS}"
        );

        let faculty = sqlx::query_as::<_, Faculty>(&query)
            .bind(&dto.name)
            .bind(dto.code.to_uppercase())
            .bind(&dto.description)
            .bind(&dto.contact_email)
            .bind(&dto.contact_phone)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(faculty.name = %dto.name, "Duplicate faculty name");
                    return AppError::conflict(anyhow!("Faculty name already exists"));
                }
                AppError::from(e)
            })?;

        info!(faculty.id = %faculty.id, "Faculty created");

        Ok(faculty)
    }

    pub async fn get_all_faculties(db: &PgPool) -> Result<Vec<Faculty>, AppError> {
        let query =
            format!("SELECT {FACULTY_COLUMNS} FROM faculties WHERE is_active = TRUE ORDER BY name");
        let faculties = sqlx::query_as::<_, Faculty>(&query).fetch_all(db).await?;
        Ok(faculties)
    }

    pub async fn get_faculty_by_id(db: &PgPool, faculty_id: Uuid) -> Result<Faculty, AppError> {
        let query = format!("SELECT {FACULTY_COLUMNS} FROM faculties WHERE id = $1");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(faculty_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Faculty not found")))
    }

    /// Name lookup used when another record references a faculty.
    pub async fn find_by_name(db: &PgPool, name: &str) -> Result<Faculty, AppError> {
        let query =
            format!("SELECT {FACULTY_COLUMNS} FROM faculties WHERE name = $1 AND is_active = TRUE");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(name)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Faculty '{}' not found", name)))
    }

    #[instrument(skip(db, dto), fields(faculty.id = %faculty_id))]
    pub async fn update_faculty(
        db: &PgPool,
        faculty_id: Uuid,
        dto: UpdateFacultyDto,
    ) -> Result<Faculty, AppError> {
        let query = format!(
            "UPDATE faculties SET
                 name = COALESCE($2, name),
                 code = COALESCE($3, code),
                 description = COALESCE($4, description),
                 contact_email = COALESCE($5, contact_email),
                 contact_phone = COALESCE($6, contact_phone),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {FACULTY_COLUMNS}"
        );

        sqlx::query_as::<_, Faculty>(&query)
            .bind(faculty_id)
            .bind(&dto.name)
            .bind(dto.code.as_ref().map(|c| c.to_uppercase()))
            .bind(&dto.description)
            .bind(&dto.contact_email)
            .bind(&dto.contact_phone)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Faculty name already exists"));
                }
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Faculty not found")))
    }

    /// Soft delete: the faculty disappears from listings but its code keeps
    /// meaning for already-issued registration numbers.
    #[instrument(skip(db), fields(faculty.id = %faculty_id))]
    pub async fn delete_faculty(db: &PgPool, faculty_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE faculties SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(faculty_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Faculty not found")));
        }

        info!(faculty.id = %faculty_id, "Faculty deactivated");

        Ok(())
    }
}
