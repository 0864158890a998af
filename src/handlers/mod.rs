//! HTTP handlers for teachers, students and courses.

pub mod course;
pub mod student;
pub mod teacher;
