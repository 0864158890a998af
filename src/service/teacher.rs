use super::validation::Validate;
use crate::error::AppError;
use crate::model::{Course, Student, Teacher, TeacherDetail, TeacherInput};
use crate::repository::{CourseRepository, Repositories, StudentRepository, TeacherRepository};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct TeacherService {
    teachers: Arc<dyn TeacherRepository>,
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl TeacherService {
    pub fn new(repos: &Repositories) -> Self {
        TeacherService {
            teachers: repos.teachers.clone(),
            students: repos.students.clone(),
            courses: repos.courses.clone(),
        }
    }

    /// All teachers with their students and courses, loaded in three queries.
    pub async fn find_all(&self) -> Result<Vec<TeacherDetail>, AppError> {
        let teachers = self.teachers.find_all().await?;
        let ids: Vec<i64> = teachers.iter().map(|t| t.id).collect();
        let mut students = group_by_teacher(self.students.find_by_teacher_ids(&ids).await?, |s: &Student| s.teacher_id);
        let mut courses = group_by_teacher(self.courses.find_by_teacher_ids(&ids).await?, |c: &Course| c.teacher_id);
        Ok(teachers
            .into_iter()
            .map(|teacher| TeacherDetail {
                students: students.remove(&teacher.id).unwrap_or_default(),
                courses: courses.remove(&teacher.id).unwrap_or_default(),
                teacher,
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TeacherDetail>, AppError> {
        match self.teachers.find_by_id(id).await? {
            Some(teacher) => Ok(Some(self.attach(teacher).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<TeacherDetail>, AppError> {
        match self.teachers.find_by_email(email).await? {
            Some(teacher) => Ok(Some(self.attach(teacher).await?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, input: &TeacherInput) -> Result<TeacherDetail, AppError> {
        input.validate()?;
        let teacher = self.teachers.insert(input).await?;
        tracing::info!(teacher_id = teacher.id, "teacher created");
        Ok(TeacherDetail {
            teacher,
            students: Vec::new(),
            courses: Vec::new(),
        })
    }

    /// Overwrite name, email and department of an existing teacher.
    pub async fn update(&self, id: i64, details: &TeacherInput) -> Result<TeacherDetail, AppError> {
        let mut teacher = self
            .teachers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher", id))?;
        details.validate()?;
        teacher.apply(details);
        let teacher = self
            .teachers
            .update(&teacher)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher", id))?;
        tracing::info!(teacher_id = id, "teacher updated");
        self.attach(teacher).await
    }

    /// Delete a teacher and everything it owns. Absent ids are not an error.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let removed = self.teachers.delete_by_id(id).await?;
        tracing::info!(teacher_id = id, removed, "teacher delete");
        Ok(())
    }

    async fn attach(&self, teacher: Teacher) -> Result<TeacherDetail, AppError> {
        let students = self.students.find_by_teacher_id(teacher.id).await?;
        let courses = self.courses.find_by_teacher_id(teacher.id).await?;
        Ok(TeacherDetail {
            teacher,
            students,
            courses,
        })
    }
}

fn group_by_teacher<T>(rows: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    rows.into_iter().fold(HashMap::new(), |mut m, row| {
        m.entry(key(&row)).or_default().push(row);
        m
    })
}
