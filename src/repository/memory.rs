//! Process-local store. Enforces the same unique columns and cascade rules as the SQL schema.

use super::{CourseRepository, StudentRepository, TeacherRepository};
use crate::error::AppError;
use crate::model::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    next_id: i64,
    teachers: BTreeMap<i64, Teacher>,
    students: BTreeMap<i64, Student>,
    courses: BTreeMap<i64, Course>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_teacher_unique(&self, email: &str, except: Option<i64>) -> Result<(), AppError> {
        if self.teachers.values().any(|t| t.email == email && Some(t.id) != except) {
            return Err(AppError::Conflict(format!("teacher email '{}' already exists", email)));
        }
        Ok(())
    }

    fn check_student_unique(&self, email: &str, student_id: &str, except: Option<i64>) -> Result<(), AppError> {
        for s in self.students.values().filter(|s| Some(s.id) != except) {
            if s.email == email {
                return Err(AppError::Conflict(format!("student email '{}' already exists", email)));
            }
            if s.student_id == student_id {
                return Err(AppError::Conflict(format!("student id '{}' already exists", student_id)));
            }
        }
        Ok(())
    }

    fn check_course_unique(&self, course_code: &str, except: Option<i64>) -> Result<(), AppError> {
        if self.courses.values().any(|c| c.course_code == course_code && Some(c.id) != except) {
            return Err(AppError::Conflict(format!("course code '{}' already exists", course_code)));
        }
        Ok(())
    }
}

/// In-memory backend for tests and `STORAGE_BACKEND=memory`. Ids are shared across tables
/// and never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError> {
        Ok(self.read().teachers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError> {
        Ok(self.read().teachers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, AppError> {
        Ok(self.read().teachers.values().find(|t| t.email == email).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.read().teachers.contains_key(&id))
    }

    async fn insert(&self, input: &TeacherInput) -> Result<Teacher, AppError> {
        let mut tables = self.write();
        tables.check_teacher_unique(&input.email, None)?;
        let teacher = Teacher {
            id: tables.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            department: input.department.clone(),
        };
        tables.teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn update(&self, teacher: &Teacher) -> Result<Option<Teacher>, AppError> {
        let mut tables = self.write();
        if !tables.teachers.contains_key(&teacher.id) {
            return Ok(None);
        }
        tables.check_teacher_unique(&teacher.email, Some(teacher.id))?;
        tables.teachers.insert(teacher.id, teacher.clone());
        Ok(Some(teacher.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write();
        if tables.teachers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.students.retain(|_, s| s.teacher_id != id);
        tables.courses.retain(|_, c| c.teacher_id != id);
        Ok(true)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut tables = self.write();
        let n = tables.teachers.len() as u64;
        tables.teachers.clear();
        tables.students.clear();
        tables.courses.clear();
        Ok(n)
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.read().students.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.read().students.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        Ok(self.read().students.values().find(|s| s.email == email).cloned())
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, AppError> {
        Ok(self.read().students.values().find(|s| s.student_id == student_id).cloned())
    }

    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Student>, AppError> {
        Ok(self
            .read()
            .students
            .values()
            .filter(|s| s.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Student>, AppError> {
        Ok(self
            .read()
            .students
            .values()
            .filter(|s| teacher_ids.contains(&s.teacher_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, teacher_id: i64, input: &StudentInput) -> Result<Student, AppError> {
        let mut tables = self.write();
        if !tables.teachers.contains_key(&teacher_id) {
            return Err(AppError::missing_reference("Teacher", teacher_id));
        }
        tables.check_student_unique(&input.email, &input.student_id, None)?;
        let student = Student {
            id: tables.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            student_id: input.student_id.clone(),
            teacher_id,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let mut tables = self.write();
        if !tables.students.contains_key(&student.id) {
            return Ok(None);
        }
        tables.check_student_unique(&student.email, &student.student_id, Some(student.id))?;
        tables.students.insert(student.id, student.clone());
        Ok(Some(student.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().students.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut tables = self.write();
        let n = tables.students.len() as u64;
        tables.students.clear();
        Ok(n)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.read().courses.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self.read().courses.get(&id).cloned())
    }

    async fn find_by_course_code(&self, course_code: &str) -> Result<Option<Course>, AppError> {
        Ok(self.read().courses.values().find(|c| c.course_code == course_code).cloned())
    }

    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Course>, AppError> {
        Ok(self
            .read()
            .courses
            .values()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Course>, AppError> {
        Ok(self
            .read()
            .courses
            .values()
            .filter(|c| teacher_ids.contains(&c.teacher_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, teacher_id: i64, input: &CourseInput) -> Result<Course, AppError> {
        let mut tables = self.write();
        if !tables.teachers.contains_key(&teacher_id) {
            return Err(AppError::missing_reference("Teacher", teacher_id));
        }
        tables.check_course_unique(&input.course_code, None)?;
        let credits = input
            .credits
            .ok_or_else(|| AppError::Validation("credits is required".into()))?;
        let course = Course {
            id: tables.allocate_id(),
            title: input.title.clone(),
            course_code: input.course_code.clone(),
            credits,
            teacher_id,
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, AppError> {
        let mut tables = self.write();
        if !tables.courses.contains_key(&course.id) {
            return Ok(None);
        }
        tables.check_course_unique(&course.course_code, Some(course.id))?;
        tables.courses.insert(course.id, course.clone());
        Ok(Some(course.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().courses.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut tables = self.write();
        let n = tables.courses.len() as u64;
        tables.courses.clear();
        Ok(n)
    }
}
