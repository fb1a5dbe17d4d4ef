mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_department, create_test_faculty, create_test_student, current_year_suffix,
    generate_unique_email, generate_unique_name, setup_test_app,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn register_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn login_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_student_generates_reg_no(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "email": email,
            "password": "secret123",
            "faculty_name": "Faculty of Science",
            "department_name": "Computer Science",
            "role": "student"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert!(body.get("token").is_some());

    let user = &body["user"];
    assert_eq!(user["email"], email);
    assert_eq!(user["role"], "student");
    assert_eq!(
        user["reg_no"],
        format!("SCI/CSC/{}/001", current_year_suffix())
    );
    // the projection must never leak the hash
    assert!(user.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_sequence_increments(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let year = current_year_suffix();

    for expected_seq in ["001", "002", "003"] {
        let response = app
            .clone()
            .oneshot(register_request(json!({
                "first_name": "Test",
                "last_name": "Student",
                "email": generate_unique_email(),
                "password": "secret123",
                "faculty_name": "Faculty of Science",
                "department_name": "Computer Science"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(
            body["user"]["reg_no"],
            format!("SCI/CSC/{}/{}", year, expected_seq)
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_unknown_faculty(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "email": email,
            "password": "secret123",
            "faculty_name": "Faculty of Magic",
            "department_name": "Computer Science"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Faculty of Magic"));
    // existing faculties are listed as alternatives
    assert!(message.contains("Faculty of Science"));

    // nothing was written
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_department_must_belong_to_faculty(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let science = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    let arts = create_test_faculty(&mut tx, "Faculty of Arts", "ART").await;
    create_test_department(&mut tx, "Computer Science", "CSC", science.id).await;
    create_test_department(&mut tx, "History", "HIS", arts.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    // History exists, but not inside the Faculty of Science
    let response = app
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "email": generate_unique_email(),
            "password": "secret123",
            "faculty_name": "Faculty of Science",
            "department_name": "History"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("History"));
    assert!(message.contains("Faculty of Science"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    let payload = json!({
        "first_name": "Ada",
        "last_name": "Obi",
        "email": email,
        "password": "secret123",
        "faculty_name": "Faculty of Science",
        "department_name": "Computer Science"
    });

    let first = app
        .clone()
        .oneshot(register_request(payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(register_request(payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_staff_gets_no_reg_no(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(register_request(json!({
            "first_name": "Grace",
            "last_name": "Eze",
            "email": generate_unique_email(),
            "password": "secret123",
            "faculty_name": "Faculty of Science",
            "department_name": "Computer Science",
            "role": "lecturer"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["user"]["role"], "lecturer");
    assert!(body["user"]["reg_no"].is_null());
    assert!(body["user"]["year_of_study"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "email": generate_unique_email(),
            "password": "secret123",
            "faculty_name": "Faculty of Science",
            "department_name": "Computer Science"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("last_name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "email": generate_unique_email(),
            "password": "abc",
            "faculty_name": "Faculty of Science",
            "department_name": "Computer Science"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, &generate_unique_name("Faculty"), "SCI").await;
    let department = create_test_department(&mut tx, &generate_unique_name("Dept"), "CSC", faculty.id).await;
    let email = generate_unique_email();
    create_test_student(
        &mut tx,
        &email,
        "testpass123",
        "SCI/CSC/25/001",
        faculty.id,
        department.id,
    )
    .await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(login_request(json!({
            "email": email,
            "password": "testpass123"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body.get("token").is_some());
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, &generate_unique_name("Faculty"), "SCI").await;
    let department = create_test_department(&mut tx, &generate_unique_name("Dept"), "CSC", faculty.id).await;
    let email = generate_unique_email();
    create_test_student(
        &mut tx,
        &email,
        "testpass123",
        "SCI/CSC/25/001",
        faculty.id,
        department.id,
    )
    .await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(login_request(json!({
            "email": email,
            "password": "wrongpass"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(login_request(json!({
            "email": "nobody@test.com",
            "password": "whatever1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_current_user(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let register = app
        .clone()
        .oneshot(register_request(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "email": email,
            "password": "secret123",
            "faculty_name": "Faculty of Science",
            "department_name": "Computer Science"
        })))
        .await
        .unwrap();
    let token = json_body(register).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["email"], email);
}
