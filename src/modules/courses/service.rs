use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::departments::service::DepartmentService;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    Course, CourseDetail, CourseFilterParams, CourseRoster, CreateCourseDto, EnrollRequestDto,
    EnrolledStudent, PaginatedCoursesResponse, UpdateCourseDto,
};

const COURSE_COLUMNS: &str = "id, title, code, unit, semester, level, department_id, is_active, \
                              created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(course.title = %dto.title, course.code = %dto.code))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let department = DepartmentService::find_by_name(db, &dto.department_name).await?;

        let query = format!(
            "INSERT INTO courses (title, code, unit, semester, level, department_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COURSE_COLUMNS}"
        );

        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&dto.title)
            .bind(dto.code.to_uppercase())
            .bind(dto.unit)
            .bind(dto.semester)
            .bind(dto.level)
            .bind(department.id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(course.title = %dto.title, "Duplicate course title");
                    return AppError::conflict(anyhow!("Course already exists"));
                }
                AppError::from(e)
            })?;

        info!(course.id = %course.id, "Course created");

        Ok(course)
    }

    #[instrument(skip(db, filters))]
    pub async fn get_all_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE is_active = TRUE");
        let mut bind_index = 0;

        if filters.search.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(
                " AND (title ILIKE ${i} OR code ILIKE ${i})",
                i = bind_index
            ));
        }
        if filters.department.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND department_id = ${}", bind_index));
        }
        if filters.semester.is_some() {
            bind_index += 1;
            where_clause.push_str(&format!(" AND semester = ${}", bind_index));
        }

        let count_query = format!("SELECT COUNT(*) FROM courses{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(search) = &filters.search {
            count_sql = count_sql.bind(format!("%{}%", search));
        }
        if let Some(department) = filters.department {
            count_sql = count_sql.bind(department);
        }
        if let Some(semester) = filters.semester {
            count_sql = count_sql.bind(semester);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {COURSE_COLUMNS} FROM courses{where_clause} ORDER BY code LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Course>(&data_query);
        if let Some(search) = &filters.search {
            data_sql = data_sql.bind(format!("%{}%", search));
        }
        if let Some(department) = filters.department {
            data_sql = data_sql.bind(department);
        }
        if let Some(semester) = filters.semester {
            data_sql = data_sql.bind(semester);
        }
        let courses = data_sql.fetch_all(db).await?;

        debug!(total = %total, returned = %courses.len(), "Courses fetched");

        let has_more = offset + limit < total;

        Ok(PaginatedCoursesResponse {
            data: courses,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }

    pub async fn get_course(db: &PgPool, course_id: Uuid) -> Result<CourseDetail, AppError> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(course_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("No course was found")))?;

        let department_name = match course.department_id {
            Some(department_id) => {
                sqlx::query_scalar::<_, String>("SELECT name FROM departments WHERE id = $1")
                    .bind(department_id)
                    .fetch_optional(db)
                    .await?
            }
            None => None,
        };

        let enrolled_students = Self::roster_for(db, course.id).await?;

        Ok(CourseDetail {
            course,
            department_name,
            enrolled_students,
        })
    }

    #[instrument(skip(db, dto), fields(course.id = %course_id))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let query = format!(
            "UPDATE courses SET
                 title = COALESCE($2, title),
                 code = COALESCE($3, code),
                 unit = COALESCE($4, unit),
                 semester = COALESCE($5, semester),
                 level = COALESCE($6, level),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        );

        sqlx::query_as::<_, Course>(&query)
            .bind(course_id)
            .bind(&dto.title)
            .bind(dto.code.as_ref().map(|c| c.to_uppercase()))
            .bind(dto.unit)
            .bind(dto.semester)
            .bind(dto.level)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Course title already exists"));
                }
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(db), fields(course.id = %course_id))]
    pub async fn delete_course(db: &PgPool, course_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE courses SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(course_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        info!(course.id = %course_id, "Course deactivated");

        Ok(())
    }

    /// Enroll a student into a course.
    ///
    /// The enrollment is one row in `enrollments`, so the student's course
    /// list and the course roster can never disagree: either the row exists
    /// on both sides or on neither. A duplicate request fails before any
    /// write; a concurrent duplicate trips the primary key and is reported
    /// the same way.
    #[instrument(skip(db, dto), fields(student.reg_no = %dto.reg_no, course.code = %dto.code))]
    pub async fn enroll_student(db: &PgPool, dto: EnrollRequestDto) -> Result<(), AppError> {
        let student_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE reg_no = $1 AND is_active = TRUE",
        )
        .bind(&dto.reg_no)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow!(
                "Student with registration number '{}' not found",
                dto.reg_no
            ))
        })?;

        let course_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM courses WHERE code = $1 AND is_active = TRUE",
        )
        .bind(dto.code.to_uppercase())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course code '{}' not found", dto.code)))?;

        let already_enrolled = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        if already_enrolled > 0 {
            return Err(AppError::conflict(anyhow!(
                "Student already enrolled in this course"
            )));
        }

        let inserted = sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
            .bind(student_id)
            .bind(course_id)
            .execute(db)
            .await;

        match inserted {
            Ok(_) => {
                info!(student.id = %student_id, course.id = %course_id, "Student enrolled");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::conflict(anyhow!("Student already enrolled in this course")),
            ),
            Err(e) => Err(AppError::from(e)),
        }
    }

    /// Courses that have at least one enrolled student, with their rosters.
    pub async fn get_all_enrollments(db: &PgPool) -> Result<Vec<CourseRoster>, AppError> {
        #[derive(sqlx::FromRow)]
        struct RosterRow {
            course_id: Uuid,
            title: String,
            code: String,
            department_name: Option<String>,
            id: Uuid,
            first_name: String,
            last_name: String,
            email: String,
            reg_no: Option<String>,
            grade: Option<String>,
        }

        let rows = sqlx::query_as::<_, RosterRow>(
            "SELECT c.id AS course_id, c.title, c.code, d.name AS department_name,
                    u.id, u.first_name, u.last_name, u.email, u.reg_no, e.grade
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             JOIN users u ON u.id = e.user_id
             LEFT JOIN departments d ON d.id = c.department_id
             ORDER BY c.code, c.id, u.last_name, u.first_name",
        )
        .fetch_all(db)
        .await?;

        let mut rosters: Vec<CourseRoster> = Vec::new();
        for row in rows {
            let student = EnrolledStudent {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                reg_no: row.reg_no,
                grade: row.grade,
            };

            match rosters.last_mut() {
                Some(roster) if roster.id == row.course_id => {
                    roster.enrolled_students.push(student);
                }
                _ => rosters.push(CourseRoster {
                    id: row.course_id,
                    title: row.title,
                    code: row.code,
                    department_name: row.department_name,
                    enrolled_students: vec![student],
                }),
            }
        }

        Ok(rosters)
    }

    async fn roster_for(db: &PgPool, course_id: Uuid) -> Result<Vec<EnrolledStudent>, AppError> {
        let students = sqlx::query_as::<_, EnrolledStudent>(
            "SELECT u.id, u.first_name, u.last_name, u.email, u.reg_no, e.grade
             FROM enrollments e
             JOIN users u ON u.id = e.user_id
             WHERE e.course_id = $1
             ORDER BY u.last_name, u.first_name",
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }
}
