//! /api/teachers handlers.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, CurrentUser};
use crate::model::{TeacherDetail, TeacherInput};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TeacherDetail>>, AppError> {
    Ok(Json(state.services.teachers.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TeacherDetail>, AppError> {
    let teacher = state
        .services
        .teachers
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher", id))?;
    Ok(Json(teacher))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<TeacherInput>,
) -> Result<(StatusCode, Json<TeacherDetail>), AppError> {
    tracing::debug!(username = %user.username, "create teacher");
    let teacher = state.services.teachers.save(&body).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<TeacherInput>,
) -> Result<Json<TeacherDetail>, AppError> {
    tracing::debug!(username = %user.username, teacher_id = id, "update teacher");
    Ok(Json(state.services.teachers.update(id, &body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    tracing::debug!(username = %user.username, teacher_id = id, "delete teacher");
    state.services.teachers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
