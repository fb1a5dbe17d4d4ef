use anyhow::anyhow;
use chrono::Datelike;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AccountProfile, AuthResponse, LoginRequest, RegisterRequestDto, User, UserRole};
use super::regno;

/// How many times account creation retries registration-number generation
/// when a concurrent signup claims the same sequence slot.
const MAX_REG_NO_ATTEMPTS: u32 = 3;

const USER_COLUMNS: &str = "id, first_name, last_name, email, role, reg_no, year_of_study, \
                            faculty_id, department_id, is_active, created_at, updated_at";

enum InsertOutcome {
    Created(User),
    DuplicateEmail,
    DuplicateRegNo,
}

pub struct AuthService;

impl AuthService {
    /// Create an account and issue a token for it.
    ///
    /// Checks run in a fixed order: faculty, department (scoped to that
    /// faculty), then email uniqueness, and only then is the password
    /// hashed and, for students, a registration number generated.
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let faculty = regno::resolve_faculty(db, &dto.faculty_name).await?;
        let department = regno::resolve_department(db, &dto.department_name, &faculty).await?;

        let email_taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_one(db)
            .await?;
        if email_taken > 0 {
            return Err(AppError::conflict(anyhow!(
                "An account with this email already exists, log in"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or(UserRole::Student);

        let mut attempts = 0;
        let user = loop {
            attempts += 1;

            let profile = match role {
                UserRole::Student => AccountProfile::Student {
                    reg_no: regno::generate_reg_no(db, &dto.faculty_name, &dto.department_name)
                        .await?,
                    year_of_study: chrono::Utc::now().year(),
                },
                UserRole::Admin | UserRole::Lecturer => AccountProfile::Staff,
            };

            let outcome = Self::insert_user(
                db,
                &dto,
                role,
                &profile,
                &hashed_password,
                faculty.id,
                department.id,
            )
            .await?;

            match outcome {
                InsertOutcome::Created(user) => break user,
                InsertOutcome::DuplicateEmail => {
                    return Err(AppError::conflict(anyhow!(
                        "An account with this email already exists, log in"
                    )));
                }
                InsertOutcome::DuplicateRegNo if attempts < MAX_REG_NO_ATTEMPTS => {
                    warn!(
                        attempt = attempts,
                        "Registration number collision, regenerating"
                    );
                    continue;
                }
                InsertOutcome::DuplicateRegNo => {
                    return Err(AppError::conflict(anyhow!(
                        "Could not allocate a unique registration number, please retry"
                    )));
                }
            }
        };

        info!(user.id = %user.id, user.role = ?user.role, "Account created");

        let token = create_access_token(user.id, &user.email, &user.first_name, jwt_config)?;

        Ok(AuthResponse { token, user })
    }

    async fn insert_user(
        db: &PgPool,
        dto: &RegisterRequestDto,
        role: UserRole,
        profile: &AccountProfile,
        hashed_password: &str,
        faculty_id: Uuid,
        department_id: Uuid,
    ) -> Result<InsertOutcome, AppError> {
        let query = format!(
            "INSERT INTO users
                 (first_name, last_name, email, password, role, reg_no, year_of_study,
                  faculty_id, department_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {USER_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(&dto.email)
            .bind(hashed_password)
            .bind(role)
            .bind(profile.reg_no())
            .bind(profile.year_of_study())
            .bind(faculty_id)
            .bind(department_id)
            .fetch_one(db)
            .await;

        match inserted {
            Ok(user) => Ok(InsertOutcome::Created(user)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                match db_err.constraint() {
                    Some("users_email_key") => Ok(InsertOutcome::DuplicateEmail),
                    Some("users_reg_no_key") => Ok(InsertOutcome::DuplicateRegNo),
                    _ => Err(AppError::database(anyhow!(
                        "Unexpected unique violation creating user: {}",
                        db_err
                    ))),
                }
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            password: String,
            #[sqlx(flatten)]
            user: User,
        }

        let query = format!("SELECT password, {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserWithPassword>(&query)
            .bind(&dto.email)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Email is not registered, sign up")))?;

        let is_valid = verify_password(&dto.password, &row.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(anyhow!("Incorrect password")));
        }

        let user = row.user;
        let token = create_access_token(user.id, &user.email, &user.first_name, jwt_config)?;

        info!(user.id = %user.id, "Login successful");

        Ok(AuthResponse { token, user })
    }

    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }
}
