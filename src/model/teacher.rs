use super::{Course, Student};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl Teacher {
    /// Copy the editable fields from `details`, keeping id.
    pub fn apply(&mut self, details: &TeacherInput) {
        self.name = details.name.clone();
        self.email = details.email.clone();
        self.department = details.department.clone();
    }
}

/// Teacher as returned by the API: the row plus the students and courses it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}
