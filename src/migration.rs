//! Schema DDL for teachers, students and courses.
//! Idempotent: every statement is IF NOT EXISTS, so it runs on each startup.

use crate::error::AppError;
use crate::store::qualified_table;
use sqlx::PgPool;

/// Create the schema, the three tables and their foreign-key indexes.
/// Students and courses reference their teacher with ON DELETE CASCADE.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let teachers = qualified_table(schema, "teachers");
    let students = qualified_table(schema, "students");
    let courses = qualified_table(schema, "courses");

    let statements = [
        format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                department TEXT NOT NULL
            )
            "#,
            teachers
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                student_id TEXT NOT NULL UNIQUE,
                teacher_id BIGINT NOT NULL REFERENCES {} (id) ON DELETE CASCADE
            )
            "#,
            students, teachers
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                course_code TEXT NOT NULL UNIQUE,
                credits INTEGER NOT NULL,
                teacher_id BIGINT NOT NULL REFERENCES {} (id) ON DELETE CASCADE
            )
            "#,
            courses, teachers
        ),
        format!("CREATE INDEX IF NOT EXISTS students_teacher_id_idx ON {} (teacher_id)", students),
        format!("CREATE INDEX IF NOT EXISTS courses_teacher_id_idx ON {} (teacher_id)", courses),
    ];

    for sql in &statements {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "schema ready");
    Ok(())
}
