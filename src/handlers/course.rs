//! /api/courses handlers.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, CurrentUser};
use crate::model::{Course, CourseInput};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.services.courses.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Course>, AppError> {
    let course = state
        .services
        .courses
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Course", id))?;
    Ok(Json(course))
}

pub async fn list_by_teacher(
    State(state): State<AppState>,
    ApiPath(teacher_id): ApiPath<i64>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.services.courses.find_by_teacher_id(teacher_id).await?))
}

pub async fn create_for_teacher(
    State(state): State<AppState>,
    ApiPath(teacher_id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CourseInput>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    tracing::debug!(username = %user.username, teacher_id, "create course");
    let course = state.services.courses.save_with_teacher(teacher_id, &body).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CourseInput>,
) -> Result<Json<Course>, AppError> {
    tracing::debug!(username = %user.username, course_id = id, "update course");
    Ok(Json(state.services.courses.update(id, &body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    tracing::debug!(username = %user.username, course_id = id, "delete course");
    state.services.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
