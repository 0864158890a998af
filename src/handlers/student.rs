//! /api/students handlers.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, CurrentUser};
use crate::model::{Student, StudentInput};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.services.students.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .services
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", id))?;
    Ok(Json(student))
}

/// Students of one teacher; an unknown teacher yields an empty list.
pub async fn list_by_teacher(
    State(state): State<AppState>,
    ApiPath(teacher_id): ApiPath<i64>,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.services.students.find_by_teacher_id(teacher_id).await?))
}

pub async fn create_for_teacher(
    State(state): State<AppState>,
    ApiPath(teacher_id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<StudentInput>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    tracing::debug!(username = %user.username, teacher_id, "create student");
    let student = state.services.students.save_with_teacher(teacher_id, &body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<StudentInput>,
) -> Result<Json<Student>, AppError> {
    tracing::debug!(username = %user.username, student_id = id, "update student");
    Ok(Json(state.services.students.update(id, &body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    tracing::debug!(username = %user.username, student_id = id, "delete student");
    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
