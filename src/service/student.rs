use super::validation::Validate;
use crate::error::AppError;
use crate::model::{Student, StudentInput};
use crate::repository::{Repositories, StudentRepository, TeacherRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl StudentService {
    pub fn new(repos: &Repositories) -> Self {
        StudentService {
            students: repos.students.clone(),
            teachers: repos.teachers.clone(),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        self.students.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        self.students.find_by_id(id).await
    }

    pub async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Student>, AppError> {
        self.students.find_by_teacher_id(teacher_id).await
    }

    /// Enrol a student under `teacher_id`. Nothing is written if the teacher does not exist.
    pub async fn save_with_teacher(&self, teacher_id: i64, input: &StudentInput) -> Result<Student, AppError> {
        if !self.teachers.exists_by_id(teacher_id).await? {
            return Err(AppError::missing_reference("Teacher", teacher_id));
        }
        input.validate()?;
        let student = self.students.insert(teacher_id, input).await?;
        tracing::info!(student_id = student.id, teacher_id, "student created");
        Ok(student)
    }

    /// Overwrite name, email and studentId. The owning teacher is unchanged.
    pub async fn update(&self, id: i64, details: &StudentInput) -> Result<Student, AppError> {
        let mut student = self
            .students
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student", id))?;
        details.validate()?;
        student.apply(details);
        let student = self
            .students
            .update(&student)
            .await?
            .ok_or_else(|| AppError::not_found("Student", id))?;
        tracing::info!(student_id = id, "student updated");
        Ok(student)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let removed = self.students.delete_by_id(id).await?;
        tracing::info!(student_id = id, removed, "student delete");
        Ok(())
    }
}
