//! Persistence traits and their PostgreSQL / in-memory backends.
//!
//! Each backend is a single store type that implements all three traits, so
//! cross-table rules (unique columns, cascade on teacher delete) live in one place.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, AppError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn insert(&self, input: &TeacherInput) -> Result<Teacher, AppError>;
    /// Persist the fields of an existing teacher. `Ok(None)` if the row is gone.
    async fn update(&self, teacher: &Teacher) -> Result<Option<Teacher>, AppError>;
    /// Delete the teacher and everything it owns. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn delete_all(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError>;
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, AppError>;
    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Student>, AppError>;
    /// Batch-load students for several teachers in one round-trip.
    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Student>, AppError>;
    /// Insert a student owned by `teacher_id`. Fails with `MissingReference` if the teacher is gone.
    async fn insert(&self, teacher_id: i64, input: &StudentInput) -> Result<Student, AppError>;
    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn delete_all(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Course>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;
    async fn find_by_course_code(&self, course_code: &str) -> Result<Option<Course>, AppError>;
    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Course>, AppError>;
    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Course>, AppError>;
    async fn insert(&self, teacher_id: i64, input: &CourseInput) -> Result<Course, AppError>;
    async fn update(&self, course: &Course) -> Result<Option<Course>, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn delete_all(&self) -> Result<u64, AppError>;
}

/// The three repositories, backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub teachers: Arc<dyn TeacherRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool, schema: &str) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool, schema)))
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: TeacherRepository + StudentRepository + CourseRepository + 'static,
    {
        Repositories {
            teachers: store.clone(),
            students: store.clone(),
            courses: store,
        }
    }
}
