mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    bearer_token, create_test_department, create_test_faculty, create_test_student,
    generate_unique_email, setup_test_app,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_includes_directory_names(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    let department = create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    create_test_student(
        &mut tx,
        &generate_unique_email(),
        "testpass123",
        "SCI/CSC/25/001",
        faculty.id,
        department.id,
    )
    .await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/all")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["reg_no"], "SCI/CSC/25/001");
    assert_eq!(students[0]["faculty_name"], "Faculty of Science");
    assert_eq!(students[0]["department_name"], "Computer Science");
    assert!(students[0].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_by_reg_no_with_slashes(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let faculty = create_test_faculty(&mut tx, "Faculty of Science", "SCI").await;
    let department = create_test_department(&mut tx, "Computer Science", "CSC", faculty.id).await;
    let student = create_test_student(
        &mut tx,
        &generate_unique_email(),
        "testpass123",
        "SCI/CSC/25/001",
        faculty.id,
        department.id,
    )
    .await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/SCI/CSC/25/001")
        .header("authorization", format!("Bearer {}", bearer_token()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["email"], student.email);
    assert_eq!(body["reg_no"], "SCI/CSC/25/001");
    assert!(body["courses"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_student(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/SCI/CSC/25/404")
        .header("authorization", format!("Bearer {}", bearer_token()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
