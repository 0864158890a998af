//! Shared helpers for the HTTP tests: an in-memory app and Basic-auth requests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use school_admin::{app, AppState, Settings, StorageBackend};
use tower::ServiceExt;

pub const ADMIN: (&str, &str) = ("admin", "admin123");
pub const USER: (&str, &str) = ("user", "user123");

/// Router over a fresh in-memory store with the default accounts.
pub fn create_test_app() -> Router {
    let settings = Settings {
        storage: StorageBackend::Memory,
        ..Settings::default()
    };
    app(AppState::in_memory(&settings), &settings)
}

pub fn basic(credentials: (&str, &str)) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", credentials.0, credentials.1))
    )
}

/// Send a request and return the status with the body parsed as JSON (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    credentials: Option<(&str, &str)>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic(c));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// POST a raw body (not necessarily valid JSON) as `application/json`.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, basic(credentials))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

pub async fn get(app: &Router, uri: &str, credentials: (&str, &str)) -> (StatusCode, serde_json::Value) {
    send(app, Method::GET, uri, Some(credentials), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, Method::POST, uri, Some(credentials), Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, Method::PUT, uri, Some(credentials), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, credentials: (&str, &str)) -> StatusCode {
    send(app, Method::DELETE, uri, Some(credentials), None).await.0
}

/// Create a teacher as admin and return its id.
pub async fn create_teacher(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/teachers",
        ADMIN,
        serde_json::json!({ "name": name, "email": email, "department": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create teacher: {body}");
    body["id"].as_i64().unwrap()
}
