//! End-to-end tests of the /api routes over the in-memory backend.

mod common;

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use serde_json::json;
use tower::ServiceExt;

use common::{
    create_teacher, create_test_app, delete, get, post_json, post_raw, put_json, send, ADMIN, USER,
};

// ============================================================
// Authentication and roles
// ============================================================

#[tokio::test]
async fn test_missing_credentials_returns_401_with_challenge() {
    let app = create_test_app();
    let request = Request::builder()
        .uri("/api/teachers")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(challenge.starts_with("Basic realm="));
}

#[tokio::test]
async fn test_wrong_password_returns_401() {
    let app = create_test_app();
    let (status, body) = get(&app, "/api/teachers", ("admin", "nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_user_role_can_read() {
    let app = create_test_app();
    let (status, body) = get(&app, "/api/teachers", USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_user_role_cannot_write() {
    let app = create_test_app();
    let (status, body) = post_json(
        &app,
        "/api/teachers",
        USER,
        json!({ "name": "John Doe", "email": "john@school.com", "department": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (_, list) = get(&app, "/api/teachers", ADMIN).await;
    assert_eq!(list, json!([]), "forbidden request must not persist anything");
}

#[tokio::test]
async fn test_user_role_cannot_delete() {
    let app = create_test_app();
    let id = create_teacher(&app, "John Doe", "john@school.com").await;
    assert_eq!(delete(&app, &format!("/api/teachers/{id}"), USER).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_credentials_returns_401_on_every_resource() {
    let app = create_test_app();
    for uri in ["/api/teachers", "/api/students", "/api/courses", "/api/students/teacher/1"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"]["code"], "unauthorized", "{uri}");
    }
}

#[tokio::test]
async fn test_user_role_cannot_update() {
    let app = create_test_app();
    let id = create_teacher(&app, "John Doe", "john@school.com").await;
    let (status, _) = put_json(
        &app,
        &format!("/api/teachers/{id}"),
        USER,
        json!({ "name": "John Smith", "email": "john.smith@school.com", "department": "Physics" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = get(&app, &format!("/api/teachers/{id}"), ADMIN).await;
    assert_eq!(body["name"], "John Doe");
}

#[tokio::test]
async fn test_user_role_malformed_post_is_still_403() {
    let app = create_test_app();
    let (status, body) = post_raw(&app, "/api/teachers", USER, "{not json").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");
}

#[tokio::test]
async fn test_health_needs_no_credentials() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "memory");
}

// ============================================================
// Malformed requests
// ============================================================

#[tokio::test]
async fn test_non_numeric_id_returns_400_envelope() {
    let app = create_test_app();
    for uri in ["/api/teachers/abc", "/api/students/abc", "/api/courses/teacher/abc"] {
        let (status, body) = get(&app, uri, USER).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["code"], "bad_request", "{uri}");
        assert!(body["error"]["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_json_returns_400_envelope() {
    let app = create_test_app();
    let (status, body) = post_raw(&app, "/api/teachers", ADMIN, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_wrong_field_type_returns_422_envelope() {
    let app = create_test_app();
    let (status, body) = post_json(&app, "/api/teachers", ADMIN, json!({ "name": 1 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

// ============================================================
// Teachers
// ============================================================

#[tokio::test]
async fn test_create_teacher_returns_201_with_empty_collections() {
    let app = create_test_app();
    let (status, body) = post_json(
        &app,
        "/api/teachers",
        ADMIN,
        json!({ "name": "John Doe", "email": "john@school.com", "department": "Mathematics" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@school.com");
    assert_eq!(body["department"], "Mathematics");
    assert_eq!(body["students"], json!([]));
    assert_eq!(body["courses"], json!([]));
}

#[tokio::test]
async fn test_create_teacher_ignores_client_id() {
    let app = create_test_app();
    let (status, body) = post_json(
        &app,
        "/api/teachers",
        ADMIN,
        json!({ "id": 999, "name": "John Doe", "email": "john@school.com", "department": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], 999);
}

#[tokio::test]
async fn test_get_missing_teacher_returns_404() {
    let app = create_test_app();
    let (status, body) = get(&app, "/api/teachers/999", ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_update_teacher() {
    let app = create_test_app();
    let id = create_teacher(&app, "John Doe", "john@school.com").await;

    let (status, body) = put_json(
        &app,
        &format!("/api/teachers/{id}"),
        ADMIN,
        json!({ "name": "John Smith", "email": "john.smith@school.com", "department": "Physics" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "John Smith");
    assert_eq!(body["department"], "Physics");
}

#[tokio::test]
async fn test_update_missing_teacher_returns_404() {
    let app = create_test_app();
    let (status, body) = put_json(
        &app,
        "/api/teachers/999",
        ADMIN,
        json!({ "name": "John Smith", "email": "john.smith@school.com", "department": "Physics" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Teacher not found with id: 999");
}

#[tokio::test]
async fn test_duplicate_teacher_email_returns_409() {
    let app = create_test_app();
    create_teacher(&app, "John Doe", "john@school.com").await;
    let (status, body) = post_json(
        &app,
        "/api/teachers",
        ADMIN,
        json!({ "name": "Other John", "email": "john@school.com", "department": "Art" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_invalid_teacher_returns_422() {
    let app = create_test_app();
    let (status, body) = post_json(
        &app,
        "/api/teachers",
        ADMIN,
        json!({ "name": "", "email": "not-an-email", "department": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_delete_teacher_cascades_and_is_idempotent() {
    let app = create_test_app();
    let id = create_teacher(&app, "John Doe", "john@school.com").await;
    post_json(
        &app,
        &format!("/api/students/teacher/{id}"),
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/courses/teacher/{id}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": 3 }),
    )
    .await;

    assert_eq!(delete(&app, &format!("/api/teachers/{id}"), ADMIN).await, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &format!("/api/teachers/{id}"), ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, students) = get(&app, "/api/students", ADMIN).await;
    assert_eq!(students, json!([]));
    let (_, courses) = get(&app, "/api/courses", ADMIN).await;
    assert_eq!(courses, json!([]));

    assert_eq!(delete(&app, &format!("/api/teachers/{id}"), ADMIN).await, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_teacher_detail_lists_owned_students_and_courses() {
    let app = create_test_app();
    let john = create_teacher(&app, "John Doe", "john@school.com").await;
    let jane = create_teacher(&app, "Jane Roe", "jane@school.com").await;
    post_json(
        &app,
        &format!("/api/students/teacher/{john}"),
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/courses/teacher/{jane}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": 3 }),
    )
    .await;

    let (status, body) = get(&app, &format!("/api/teachers/{john}"), USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().unwrap().len(), 1);
    assert_eq!(body["students"][0]["studentId"], "S001");
    assert_eq!(body["courses"], json!([]));

    let (_, all) = get(&app, "/api/teachers", USER).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1]["courses"][0]["courseCode"], "MATH101");
    assert_eq!(all[1]["students"], json!([]));
}

// ============================================================
// Students
// ============================================================

#[tokio::test]
async fn test_create_student_for_teacher() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;

    let (status, body) = post_json(
        &app,
        &format!("/api/students/teacher/{teacher}"),
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["teacherId"], teacher);
    assert_eq!(body["studentId"], "S001");

    let (status, list) = get(&app, &format!("/api/students/teacher/{teacher}"), USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_student_for_missing_teacher_returns_400() {
    let app = create_test_app();
    let (status, body) = post_json(
        &app,
        "/api/students/teacher/999",
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Teacher not found with id: 999");
}

#[tokio::test]
async fn test_students_of_unknown_teacher_is_empty() {
    let app = create_test_app();
    let (status, body) = get(&app, "/api/students/teacher/999", USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_duplicate_student_id_returns_409() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let uri = format!("/api/students/teacher/{teacher}");
    post_json(
        &app,
        &uri,
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    let (status, _) = post_json(
        &app,
        &uri,
        ADMIN,
        json!({ "name": "Bob Brown", "email": "bob@school.com", "studentId": "S001" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_student_keeps_teacher() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let (_, created) = post_json(
        &app,
        &format!("/api/students/teacher/{teacher}"),
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/students/{id}"),
        ADMIN,
        json!({ "name": "Alice Jones", "email": "alice.jones@school.com", "studentId": "S002" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice Jones");
    assert_eq!(body["studentId"], "S002");
    assert_eq!(body["teacherId"], teacher);
}

#[tokio::test]
async fn test_update_missing_student_returns_404() {
    let app = create_test_app();
    let (status, body) = put_json(
        &app,
        "/api/students/999",
        ADMIN,
        json!({ "name": "Alice Jones", "email": "alice.jones@school.com", "studentId": "S002" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Student not found with id: 999");
}

#[tokio::test]
async fn test_delete_student_returns_204() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let (_, created) = post_json(
        &app,
        &format!("/api/students/teacher/{teacher}"),
        ADMIN,
        json!({ "name": "Alice Smith", "email": "alice@school.com", "studentId": "S001" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    assert_eq!(delete(&app, &format!("/api/students/{id}"), ADMIN).await, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/api/students/{id}"), ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================
// Courses
// ============================================================

#[tokio::test]
async fn test_create_and_update_course() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;

    let (status, created) = post_json(
        &app,
        &format!("/api/courses/teacher/{teacher}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["teacherId"], teacher);
    let id = created["id"].as_i64().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/courses/{id}"),
        ADMIN,
        json!({ "title": "Calculus II", "courseCode": "MATH102", "credits": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Calculus II");
    assert_eq!(body["credits"], 4);
    assert_eq!(body["teacherId"], teacher);
}

#[tokio::test]
async fn test_course_for_missing_teacher_returns_400() {
    let app = create_test_app();
    let (status, _) = post_json(
        &app,
        "/api/courses/teacher/42",
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_course_credits_out_of_range_returns_422() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let (status, _) = post_json(
        &app,
        &format!("/api/courses/teacher/{teacher}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_course_without_credits_returns_422() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let (status, body) = post_json(
        &app,
        &format!("/api/courses/teacher/{teacher}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "validation: credits is required");

    let (_, courses) = get(&app, "/api/courses", ADMIN).await;
    assert_eq!(courses, json!([]));
}

#[tokio::test]
async fn test_update_course_without_credits_keeps_stored_value() {
    let app = create_test_app();
    let teacher = create_teacher(&app, "John Doe", "john@school.com").await;
    let (_, created) = post_json(
        &app,
        &format!("/api/courses/teacher/{teacher}"),
        ADMIN,
        json!({ "title": "Calculus I", "courseCode": "MATH101", "credits": 3 }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = put_json(
        &app,
        &format!("/api/courses/{id}"),
        ADMIN,
        json!({ "title": "Calculus II", "courseCode": "MATH102" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, stored) = get(&app, &format!("/api/courses/{id}"), ADMIN).await;
    assert_eq!(stored["credits"], 3);
    assert_eq!(stored["title"], "Calculus I");
}

#[tokio::test]
async fn test_delete_missing_course_returns_204() {
    let app = create_test_app();
    assert_eq!(delete(&app, "/api/courses/999", ADMIN).await, StatusCode::NO_CONTENT);
}
