use acadex::config::cors::CorsConfig;
use acadex::config::jwt::JwtConfig;
use acadex::router::init_router;
use acadex::state::AppState;
use acadex::utils::jwt::create_access_token;
use acadex::utils::password::hash_password;
use chrono::Datelike;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

/// Mint a bearer token the way the API does. The extractor only checks the
/// signature and expiry, so the subject does not need to exist.
#[allow(dead_code)]
pub fn bearer_token() -> String {
    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();
    create_access_token(Uuid::new_v4(), "fixture@test.com", "Fixture", &jwt_config).unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}

/// Two-digit year as it appears in freshly generated registration numbers.
#[allow(dead_code)]
pub fn current_year_suffix() -> String {
    format!("{:02}", chrono::Utc::now().year().rem_euclid(100))
}

#[allow(dead_code)]
pub struct TestFaculty {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

#[allow(dead_code)]
pub struct TestDepartment {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

#[allow(dead_code)]
pub struct TestStudent {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub reg_no: String,
}

#[allow(dead_code)]
pub struct TestCourse {
    pub id: Uuid,
    pub title: String,
    pub code: String,
}

#[allow(dead_code)]
pub async fn create_test_faculty(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    code: &str,
) -> TestFaculty {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO faculties (name, code, contact_email, contact_phone)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(code)
    .bind(format!("{}@test.com", code.to_lowercase()))
    .bind("+1000000000")
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestFaculty {
        id,
        name: name.to_string(),
        code: code.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_department(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    code: &str,
    faculty_id: Uuid,
) -> TestDepartment {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO departments (name, code, faculty_id)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind(code)
    .bind(faculty_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestDepartment {
        id,
        name: name.to_string(),
        code: code.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    reg_no: &str,
    faculty_id: Uuid,
    department_id: Uuid,
) -> TestStudent {
    let hashed = hash_password(password).unwrap();
    let year = chrono::Utc::now().year();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users
             (first_name, last_name, email, password, role, reg_no, year_of_study,
              faculty_id, department_id)
         VALUES ($1, $2, $3, $4, 'student', $5, $6, $7, $8)
         RETURNING id",
    )
    .bind("Test")
    .bind("Student")
    .bind(email)
    .bind(&hashed)
    .bind(reg_no)
    .bind(year)
    .bind(faculty_id)
    .bind(department_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestStudent {
        id,
        email: email.to_string(),
        password: password.to_string(),
        reg_no: reg_no.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_course(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    code: &str,
    department_id: Uuid,
) -> TestCourse {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (title, code, unit, semester, department_id)
         VALUES ($1, $2, 3, 'first', $3)
         RETURNING id",
    )
    .bind(title)
    .bind(code)
    .bind(department_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestCourse {
        id,
        title: title.to_string(),
        code: code.to_string(),
    }
}
