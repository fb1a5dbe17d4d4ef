use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::modules::faculties::service::FacultyService;
use crate::utils::errors::AppError;

use super::model::{CreateDepartmentDto, Department, DepartmentFilterParams, UpdateDepartmentDto};

const DEPARTMENT_COLUMNS: &str =
    "id, name, code, description, faculty_id, is_active, created_at, updated_at";

pub struct DepartmentService;

impl DepartmentService {
    /// Create a department under the faculty named in the DTO.
    #[instrument(skip(db, dto), fields(department.name = %dto.name, faculty.name = %dto.faculty))]
    pub async fn create_department(
        db: &PgPool,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        let faculty = FacultyService::find_by_name(db, &dto.faculty).await?;

        let query = format!(
            "INSERT INTO departments (name, code, description, faculty_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {DEPARTMENT_COLUMNS}"
        );

        let department = sqlx::query_as::<_, Department>(&query)
            .bind(&dto.name)
            .bind(dto.code.to_uppercase())
            .bind(&dto.description)
            .bind(faculty.id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(department.name = %dto.name, "Duplicate department name");
                    return AppError::conflict(anyhow!("Department name already exists"));
                }
                AppError::from(e)
            })?;

        info!(department.id = %department.id, "Department created");

        Ok(department)
    }

    pub async fn get_all_departments(
        db: &PgPool,
        filters: DepartmentFilterParams,
    ) -> Result<Vec<Department>, AppError> {
        let departments = match filters.faculty_id {
            Some(faculty_id) => {
                let query = format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments
                     WHERE is_active = TRUE AND faculty_id = $1 ORDER BY name"
                );
                sqlx::query_as::<_, Department>(&query)
                    .bind(faculty_id)
                    .fetch_all(db)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments
                     WHERE is_active = TRUE ORDER BY name"
                );
                sqlx::query_as::<_, Department>(&query).fetch_all(db).await?
            }
        };

        Ok(departments)
    }

    pub async fn get_department_by_id(
        db: &PgPool,
        department_id: Uuid,
    ) -> Result<Department, AppError> {
        let query = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(department_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Department not found")))
    }

    /// Name lookup used when another record references a department.
    pub async fn find_by_name(db: &PgPool, name: &str) -> Result<Department, AppError> {
        let query = format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE name = $1 AND is_active = TRUE"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Department '{}' not found", name)))
    }

    #[instrument(skip(db, dto), fields(department.id = %department_id))]
    pub async fn update_department(
        db: &PgPool,
        department_id: Uuid,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        let query = format!(
            "UPDATE departments SET
                 name = COALESCE($2, name),
                 code = COALESCE($3, code),
                 description = COALESCE($4, description),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {DEPARTMENT_COLUMNS}"
        );

        sqlx::query_as::<_, Department>(&query)
            .bind(department_id)
            .bind(&dto.name)
            .bind(dto.code.as_ref().map(|c| c.to_uppercase()))
            .bind(&dto.description)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Department name already exists"));
                }
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Department not found")))
    }

    #[instrument(skip(db), fields(department.id = %department_id))]
    pub async fn delete_department(db: &PgPool, department_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE departments SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(department_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Department not found")));
        }

        info!(department.id = %department_id, "Department deactivated");

        Ok(())
    }
}
