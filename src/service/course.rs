use super::validation::Validate;
use crate::error::AppError;
use crate::model::{Course, CourseInput};
use crate::repository::{CourseRepository, Repositories, TeacherRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl CourseService {
    pub fn new(repos: &Repositories) -> Self {
        CourseService {
            courses: repos.courses.clone(),
            teachers: repos.teachers.clone(),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        self.courses.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        self.courses.find_by_id(id).await
    }

    pub async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Course>, AppError> {
        self.courses.find_by_teacher_id(teacher_id).await
    }

    pub async fn save_with_teacher(&self, teacher_id: i64, input: &CourseInput) -> Result<Course, AppError> {
        if !self.teachers.exists_by_id(teacher_id).await? {
            return Err(AppError::missing_reference("Teacher", teacher_id));
        }
        input.validate()?;
        let course = self.courses.insert(teacher_id, input).await?;
        tracing::info!(course_id = course.id, teacher_id, "course created");
        Ok(course)
    }

    /// Overwrite title, courseCode and credits.
    pub async fn update(&self, id: i64, details: &CourseInput) -> Result<Course, AppError> {
        let mut course = self
            .courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course", id))?;
        details.validate()?;
        course.apply(details);
        let course = self
            .courses
            .update(&course)
            .await?
            .ok_or_else(|| AppError::not_found("Course", id))?;
        tracing::info!(course_id = id, "course updated");
        Ok(course)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let removed = self.courses.delete_by_id(id).await?;
        tracing::info!(course_id = id, removed, "course delete");
        Ok(())
    }
}
