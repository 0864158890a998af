//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Realm advertised in `WWW-Authenticate` on 401 responses.
pub const AUTH_REALM: &str = "school-admin";

/// PostgreSQL SQLSTATE for unique_violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: &'static str, id: i64 },
    /// A referenced parent row (e.g. the owning teacher) does not exist.
    #[error("{kind} not found with id: {id}")]
    MissingReference { kind: &'static str, id: i64 },
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        AppError::NotFound { kind, id }
    }

    pub fn missing_reference(kind: &'static str, id: i64) -> Self {
        AppError::MissingReference { kind, id }
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::MissingReference { .. } => (StatusCode::BAD_REQUEST, "missing_reference"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else if is_unique_violation(e) {
                    (StatusCode::CONFLICT, "conflict")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        }
    }

    /// Message safe to return to the client. Server-side failures are reported generically.
    fn client_message(&self) -> String {
        match self {
            AppError::Config(_) => "server misconfigured".into(),
            AppError::Db(e) if is_unique_violation(e) => "a record with the same unique value already exists".into(),
            AppError::Db(sqlx::Error::RowNotFound) => "record not found".into(),
            AppError::Db(_) => "database error".into(),
            other => other.to_string(),
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.client_message(),
                details: None,
            },
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            let challenge = format!("Basic realm=\"{}\"", AUTH_REALM);
            if let Ok(v) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, v);
            }
        }
        response
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::Validation(rejection.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
