use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{SetupReport, SetupStatus};

/// Sample directory seeded on first run.
const SEED_FACULTIES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Faculty of Science",
        "SCI",
        "Faculty of Science and Technology",
        "science@university.com",
        "+1234567890",
    ),
    (
        "Faculty of Arts",
        "ART",
        "Faculty of Arts and Humanities",
        "arts@university.com",
        "+1234567891",
    ),
    (
        "Faculty of Engineering",
        "ENG",
        "Faculty of Engineering",
        "engineering@university.com",
        "+1234567892",
    ),
    (
        "Faculty of Business",
        "BUS",
        "Faculty of Business Administration",
        "business@university.com",
        "+1234567893",
    ),
];

/// (department name, code, description, parent faculty name)
const SEED_DEPARTMENTS: &[(&str, &str, &str, &str)] = &[
    ("Computer Science", "CSC", "Department of Computer Science", "Faculty of Science"),
    ("Mathematics", "MTH", "Department of Mathematics", "Faculty of Science"),
    ("Physics", "PHY", "Department of Physics", "Faculty of Science"),
    ("English Literature", "ENG", "Department of English Literature", "Faculty of Arts"),
    ("History", "HIS", "Department of History", "Faculty of Arts"),
    ("Civil Engineering", "CVE", "Department of Civil Engineering", "Faculty of Engineering"),
    ("Electrical Engineering", "EEE", "Department of Electrical Engineering", "Faculty of Engineering"),
    ("Business Administration", "BBA", "Department of Business Administration", "Faculty of Business"),
    ("Accounting", "ACC", "Department of Accounting", "Faculty of Business"),
];

const SEED_ADMIN_EMAIL: &str = "admin@university.com";
const SEED_ADMIN_PASSWORD: &str = "admin123";

pub struct SetupService;

impl SetupService {
    pub async fn status(db: &PgPool) -> Result<SetupStatus, AppError> {
        let faculties = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faculties")
            .fetch_one(db)
            .await?;
        let departments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(db)
            .await?;
        let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;

        Ok(SetupStatus {
            faculties,
            departments,
            users,
            is_empty: faculties == 0 && departments == 0 && users == 0,
        })
    }

    /// Seed the sample directory and a default admin account.
    ///
    /// Refuses when faculties already exist. All inserts run inside one
    /// transaction so a failed seed leaves nothing behind.
    #[instrument(skip(db))]
    pub async fn initialize(db: &PgPool) -> Result<SetupReport, AppError> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faculties")
            .fetch_one(db)
            .await?;
        if existing > 0 {
            return Err(AppError::bad_request(anyhow!("System already initialized")));
        }

        let mut tx = db.begin().await?;

        let mut first_faculty_id: Option<Uuid> = None;
        for (name, code, description, contact_email, contact_phone) in SEED_FACULTIES {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO faculties (name, code, description, contact_email, contact_phone)
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(name)
            .bind(code)
            .bind(description)
            .bind(contact_email)
            .bind(contact_phone)
            .fetch_one(&mut *tx)
            .await?;

            first_faculty_id.get_or_insert(id);
        }

        let mut first_department_id: Option<Uuid> = None;
        for (name, code, description, faculty_name) in SEED_DEPARTMENTS {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO departments (name, code, description, faculty_id)
                 VALUES ($1, $2, $3, (SELECT id FROM faculties WHERE name = $4))
                 RETURNING id",
            )
            .bind(name)
            .bind(code)
            .bind(description)
            .bind(faculty_name)
            .fetch_one(&mut *tx)
            .await?;

            first_department_id.get_or_insert(id);
        }

        let hashed_password = hash_password(SEED_ADMIN_PASSWORD)?;
        sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password, role, faculty_id, department_id)
             VALUES ($1, $2, $3, $4, 'admin', $5, $6)",
        )
        .bind("System")
        .bind("Administrator")
        .bind(SEED_ADMIN_EMAIL)
        .bind(&hashed_password)
        .bind(first_faculty_id)
        .bind(first_department_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            faculties = SEED_FACULTIES.len(),
            departments = SEED_DEPARTMENTS.len(),
            "System initialized"
        );

        Ok(SetupReport {
            faculties: SEED_FACULTIES.len() as i64,
            departments: SEED_DEPARTMENTS.len() as i64,
            admin_email: SEED_ADMIN_EMAIL.to_string(),
        })
    }
}
