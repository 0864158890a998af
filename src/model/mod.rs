//! School entities and request payloads.
//!
//! Stored rows derive `sqlx::FromRow`; request payloads only carry the
//! client-editable scalar fields so ids and owners can never be set from a body.

mod course;
mod student;
mod teacher;

pub use course::{Course, CourseInput};
pub use student::{Student, StudentInput};
pub use teacher::{Teacher, TeacherDetail, TeacherInput};
