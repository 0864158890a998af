//! PostgreSQL store on sqlx. Tables come from `migration::apply_migrations`.

use super::{CourseRepository, StudentRepository, TeacherRepository};
use crate::error::AppError;
use crate::model::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};
use crate::store::qualified_table;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL SQLSTATE for foreign_key_violation.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

const TEACHER_COLUMNS: &str = "id, name, email, department";
const STUDENT_COLUMNS: &str = "id, name, email, student_id, teacher_id";
const COURSE_COLUMNS: &str = "id, title, course_code, credits, teacher_id";

pub struct PgStore {
    pool: PgPool,
    teachers: String,
    students: String,
    courses: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStore {
            pool,
            teachers: qualified_table(schema, "teachers"),
            students: qualified_table(schema, "students"),
            courses: qualified_table(schema, "courses"),
        }
    }
}

/// Map a foreign-key failure on insert to the missing teacher it refers to.
fn map_owner_error(e: sqlx::Error, teacher_id: i64) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) {
            return AppError::missing_reference("Teacher", teacher_id);
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl TeacherRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", TEACHER_COLUMNS, self.teachers);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Teacher>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", TEACHER_COLUMNS, self.teachers);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", TEACHER_COLUMNS, self.teachers);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Teacher>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", self.teachers);
        let exists: (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists.0)
    }

    async fn insert(&self, input: &TeacherInput) -> Result<Teacher, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email, department) VALUES ($1, $2, $3) RETURNING {}",
            self.teachers, TEACHER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Teacher>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, teacher: &Teacher) -> Result<Option<Teacher>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, email = $3, department = $4 WHERE id = $1 RETURNING {}",
            self.teachers, TEACHER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = teacher.id, "query");
        Ok(sqlx::query_as::<_, Teacher>(&sql)
            .bind(teacher.id)
            .bind(&teacher.name)
            .bind(&teacher.email)
            .bind(&teacher.department)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.teachers);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.teachers);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl StudentRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", STUDENT_COLUMNS, self.students);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", STUDENT_COLUMNS, self.students);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", STUDENT_COLUMNS, self.students);
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE student_id = $1", STUDENT_COLUMNS, self.students);
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE teacher_id = $1 ORDER BY id",
            STUDENT_COLUMNS, self.students
        );
        tracing::debug!(sql = %sql, teacher_id, "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(teacher_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Student>, AppError> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE teacher_id = ANY($1) ORDER BY id",
            STUDENT_COLUMNS, self.students
        );
        tracing::debug!(sql = %sql, teachers = teacher_ids.len(), "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(teacher_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert(&self, teacher_id: i64, input: &StudentInput) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email, student_id, teacher_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.students, STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, teacher_id, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.student_id)
            .bind(teacher_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_owner_error(e, teacher_id))
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, email = $3, student_id = $4 WHERE id = $1 RETURNING {}",
            self.students, STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, id = student.id, "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(student.id)
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.student_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.students);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.students);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COURSE_COLUMNS, self.courses);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Course>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COURSE_COLUMNS, self.courses);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_course_code(&self, course_code: &str) -> Result<Option<Course>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE course_code = $1", COURSE_COLUMNS, self.courses);
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(course_code)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_teacher_id(&self, teacher_id: i64) -> Result<Vec<Course>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE teacher_id = $1 ORDER BY id",
            COURSE_COLUMNS, self.courses
        );
        tracing::debug!(sql = %sql, teacher_id, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(teacher_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_teacher_ids(&self, teacher_ids: &[i64]) -> Result<Vec<Course>, AppError> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE teacher_id = ANY($1) ORDER BY id",
            COURSE_COLUMNS, self.courses
        );
        tracing::debug!(sql = %sql, teachers = teacher_ids.len(), "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(teacher_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert(&self, teacher_id: i64, input: &CourseInput) -> Result<Course, AppError> {
        let sql = format!(
            "INSERT INTO {} (title, course_code, credits, teacher_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.courses, COURSE_COLUMNS
        );
        let credits = input
            .credits
            .ok_or_else(|| AppError::Validation("credits is required".into()))?;
        tracing::debug!(sql = %sql, teacher_id, "query");
        sqlx::query_as::<_, Course>(&sql)
            .bind(&input.title)
            .bind(&input.course_code)
            .bind(credits)
            .bind(teacher_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_owner_error(e, teacher_id))
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, AppError> {
        let sql = format!(
            "UPDATE {} SET title = $2, course_code = $3, credits = $4 WHERE id = $1 RETURNING {}",
            self.courses, COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, id = course.id, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(course.id)
            .bind(&course.title)
            .bind(&course.course_code)
            .bind(course.credits)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.courses);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.courses);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
