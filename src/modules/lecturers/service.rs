use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreateLecturerDto, Lecturer, LecturerFilterParams, PaginatedLecturersResponse,
    UpdateLecturerDto,
};

const LECTURER_COLUMNS: &str = "id, first_name, last_name, status, faculty_id, department_id, \
                                is_active, created_at, updated_at";

pub struct LecturerService;

impl LecturerService {
    #[instrument(skip(db, dto), fields(lecturer.last_name = %dto.last_name))]
    pub async fn create_lecturer(db: &PgPool, dto: CreateLecturerDto) -> Result<Lecturer, AppError> {
        let query = format!(
            "INSERT INTO lecturers (first_name, last_name, status, faculty_id, department_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LECTURER_COLUMNS}"
        );

        let lecturer = sqlx::query_as::<_, Lecturer>(&query)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.status)
            .bind(dto.faculty_id)
            .bind(dto.department_id)
            .fetch_one(db)
            .await?;

        info!(lecturer.id = %lecturer.id, "Lecturer created");

        Ok(lecturer)
    }

    pub async fn get_all_lecturers(
        db: &PgPool,
        filters: LecturerFilterParams,
    ) -> Result<PaginatedLecturersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE is_active = TRUE");
        if filters.department_id.is_some() {
            where_clause.push_str(" AND department_id = $1");
        }

        let count_query = format!("SELECT COUNT(*) FROM lecturers{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(department_id) = filters.department_id {
            count_sql = count_sql.bind(department_id);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {LECTURER_COLUMNS} FROM lecturers{where_clause}
             ORDER BY last_name LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Lecturer>(&data_query);
        if let Some(department_id) = filters.department_id {
            data_sql = data_sql.bind(department_id);
        }
        let lecturers = data_sql.fetch_all(db).await?;

        let has_more = offset + limit < total;

        Ok(PaginatedLecturersResponse {
            data: lecturers,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    pub async fn get_lecturer_by_id(db: &PgPool, lecturer_id: Uuid) -> Result<Lecturer, AppError> {
        let query = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE id = $1");
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(lecturer_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Lecturer not found")))
    }

    #[instrument(skip(db, dto), fields(lecturer.id = %lecturer_id))]
    pub async fn update_lecturer(
        db: &PgPool,
        lecturer_id: Uuid,
        dto: UpdateLecturerDto,
    ) -> Result<Lecturer, AppError> {
        let query = format!(
            "UPDATE lecturers SET
                 first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 status = COALESCE($4, status),
                 faculty_id = COALESCE($5, faculty_id),
                 department_id = COALESCE($6, department_id),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {LECTURER_COLUMNS}"
        );

        sqlx::query_as::<_, Lecturer>(&query)
            .bind(lecturer_id)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.status)
            .bind(dto.faculty_id)
            .bind(dto.department_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Lecturer not found")))
    }

    #[instrument(skip(db), fields(lecturer.id = %lecturer_id))]
    pub async fn delete_lecturer(db: &PgPool, lecturer_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE lecturers SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(lecturer_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Lecturer not found")));
        }

        info!(lecturer.id = %lecturer_id, "Lecturer deactivated");

        Ok(())
    }
}
