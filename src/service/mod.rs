//! Business rules over the repositories: owner checks, field-copy updates, validation.

mod course;
mod student;
mod teacher;
mod validation;

pub use course::CourseService;
pub use student::StudentService;
pub use teacher::TeacherService;
pub use validation::{RequestValidator, Validate};

use crate::repository::Repositories;

/// All services over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub teachers: TeacherService,
    pub students: StudentService,
    pub courses: CourseService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Services {
            teachers: TeacherService::new(repos),
            students: StudentService::new(repos),
            courses: CourseService::new(repos),
        }
    }
}
